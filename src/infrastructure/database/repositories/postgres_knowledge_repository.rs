use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::KnowledgeArticle;
use crate::domain::repositories::KnowledgeRepository;
use crate::domain::repositories::knowledge_repository::{KnowledgeQuery, KnowledgeSort};
use crate::domain::value_objects::{ExperienceAward, ExperienceEvent};
use crate::infrastructure::database::models::{
    KnowledgeModel, NewKnowledgeModel, UpdateKnowledgeModel,
};
use crate::infrastructure::database::repositories::contains_pattern;
use crate::infrastructure::database::repositories::postgres_user_repository::{
    add_experience, require_user,
};
use crate::infrastructure::database::schema::knowledge_articles::dsl::*;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresKnowledgeRepository {
    pool: DbPool,
}

impl PostgresKnowledgeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn decode_article(model: KnowledgeModel) -> Result<KnowledgeArticle, StoreError> {
    KnowledgeArticle::try_from(model).map_err(StoreError::Database)
}

#[async_trait]
impl KnowledgeRepository for PostgresKnowledgeRepository {
    async fn create(
        &self,
        article: &KnowledgeArticle,
    ) -> Result<Option<ExperienceAward>, StoreError> {
        let new_article = NewKnowledgeModel::from(article);
        let owner = article.owner_id();

        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                if let Some(user) = owner {
                    require_user(conn, user)?;
                }
                diesel::insert_into(knowledge_articles)
                    .values(&new_article)
                    .execute(conn)?;

                owner
                    .map(|user| add_experience(conn, user, ExperienceEvent::KnowledgeCreated.points()))
                    .transpose()
            })
        })
        .await
    }

    async fn find_by_id(&self, article_id: Uuid) -> Result<Option<KnowledgeArticle>, StoreError> {
        with_connection(&self.pool, move |conn| {
            knowledge_articles
                .find(article_id)
                .select(KnowledgeModel::as_select())
                .first(conn)
                .optional()?
                .map(decode_article)
                .transpose()
        })
        .await
    }

    async fn list(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeArticle>, StoreError> {
        let query = query.clone();

        with_connection(&self.pool, move |conn| {
            let mut statement = knowledge_articles.into_boxed();

            if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                let pattern = contains_pattern(search);
                statement = statement.filter(
                    title
                        .ilike(pattern.clone())
                        .or(content.ilike(pattern.clone()))
                        .or(keywords.ilike(pattern)),
                );
            }
            if let Some(kind) = query.knowledge_type {
                statement = statement.filter(knowledge_type.eq(kind.as_str()));
            }

            statement = match query.sort {
                KnowledgeSort::Views => statement.order((view_count.desc(), created_at.desc())),
                KnowledgeSort::Latest => statement.order(created_at.desc()),
                KnowledgeSort::Title => statement.order(title.asc()),
            };

            statement
                .select(KnowledgeModel::as_select())
                .load(conn)?
                .into_iter()
                .map(decode_article)
                .collect()
        })
        .await
    }

    async fn increment_view_count(&self, article_id: Uuid) -> Result<i64, StoreError> {
        with_connection(&self.pool, move |conn| {
            diesel::update(knowledge_articles.find(article_id))
                .set(view_count.eq(view_count + 1))
                .returning(view_count)
                .get_result::<i64>(conn)
                .optional()?
                .ok_or_else(|| StoreError::not_found("knowledge article", article_id))
        })
        .await
    }

    async fn update(&self, article: &KnowledgeArticle) -> Result<(), StoreError> {
        let changes = UpdateKnowledgeModel::from(article);
        let article_id = article.id();

        with_connection(&self.pool, move |conn| {
            let updated = diesel::update(knowledge_articles.find(article_id))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                return Err(StoreError::not_found("knowledge article", article_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, article_id: Uuid) -> Result<bool, StoreError> {
        with_connection(&self.pool, move |conn| {
            let deleted = diesel::delete(knowledge_articles.find(article_id)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn count(&self) -> Result<i64, StoreError> {
        with_connection(&self.pool, move |conn| {
            Ok(knowledge_articles.count().get_result(conn)?)
        })
        .await
    }
}
