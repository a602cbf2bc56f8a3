use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::ChatRecord;
use crate::domain::repositories::ChatHistoryRepository;
use crate::infrastructure::database::models::ChatRecordModel;
use crate::infrastructure::database::schema::chat_history;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresChatHistoryRepository {
    pool: DbPool,
}

impl PostgresChatHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatHistoryRepository for PostgresChatHistoryRepository {
    async fn save(&self, record: &ChatRecord) -> Result<(), StoreError> {
        let model = ChatRecordModel::try_from(record).map_err(StoreError::Validation)?;

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(chat_history::table)
                .values(&model)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn list_by_user(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<ChatRecord>, StoreError> {
        with_connection(&self.pool, move |conn| {
            let mut statement = chat_history::table
                .select(ChatRecordModel::as_select())
                .order(chat_history::created_at.desc())
                .limit(limit)
                .into_boxed();

            statement = match user_id {
                Some(user) => statement.filter(chat_history::user_id.eq(user)),
                None => statement.filter(chat_history::user_id.is_null()),
            };

            statement
                .load(conn)?
                .into_iter()
                .map(|model| ChatRecord::try_from(model).map_err(StoreError::Database))
                .collect()
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        with_connection(&self.pool, move |conn| {
            let deleted = diesel::delete(chat_history::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn clear(&self, user_id: Option<Uuid>) -> Result<u64, StoreError> {
        with_connection(&self.pool, move |conn| {
            let deleted = match user_id {
                Some(user) => {
                    diesel::delete(chat_history::table.filter(chat_history::user_id.eq(user)))
                        .execute(conn)?
                }
                None => diesel::delete(chat_history::table.filter(chat_history::user_id.is_null()))
                    .execute(conn)?,
            };
            Ok(deleted as u64)
        })
        .await
    }
}
