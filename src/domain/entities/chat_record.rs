use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One manifest entry: an article that was fed to the assistant as context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedArticle {
    pub id: Uuid,
    pub title: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub user_message: String,
    pub bot_response: String,
    pub related_articles: Vec<RelatedArticle>,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(
        user_id: Option<Uuid>,
        user_message: String,
        bot_response: String,
        related_articles: Vec<RelatedArticle>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_message,
            bot_response,
            related_articles,
            created_at: Utc::now(),
        }
    }
}
