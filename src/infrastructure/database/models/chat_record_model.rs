use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ChatRecord, RelatedArticle};
use crate::infrastructure::database::schema::chat_history;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = chat_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatRecordModel {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub user_message: String,
    pub bot_response: String,
    pub related_articles: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&ChatRecord> for ChatRecordModel {
    type Error = String;

    fn try_from(record: &ChatRecord) -> Result<Self, Self::Error> {
        let related_articles = serde_json::to_value(&record.related_articles)
            .map_err(|e| format!("Failed to encode related articles: {}", e))?;

        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            user_message: record.user_message.clone(),
            bot_response: record.bot_response.clone(),
            related_articles,
            created_at: record.created_at,
        })
    }
}

impl TryFrom<ChatRecordModel> for ChatRecord {
    type Error = String;

    fn try_from(model: ChatRecordModel) -> Result<Self, Self::Error> {
        let related_articles: Vec<RelatedArticle> = serde_json::from_value(model.related_articles)
            .map_err(|e| format!("Invalid related articles in chat record {}: {}", model.id, e))?;

        Ok(ChatRecord {
            id: model.id,
            user_id: model.user_id,
            user_message: model.user_message,
            bot_response: model.bot_response,
            related_articles,
            created_at: model.created_at,
        })
    }
}
