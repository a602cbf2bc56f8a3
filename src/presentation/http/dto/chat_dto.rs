use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::AssembledContext;
use crate::application::use_cases::chat_with_assistant::{ChatExchange, ChatRequest};
use crate::domain::entities::{ChatRecord, RelatedArticle};

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub user_id: Option<Uuid>,
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatExchange>,
}

impl From<ChatRequestDto> for ChatRequest {
    fn from(request: ChatRequestDto) -> Self {
        Self {
            user_id: request.user_id,
            message: request.message,
            history: request.history,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContextQuery {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ContextResponseDto {
    pub context: String,
    pub related_articles: Vec<RelatedArticle>,
}

impl From<AssembledContext> for ContextResponseDto {
    fn from(context: AssembledContext) -> Self {
        Self {
            context: context.text,
            related_articles: context.manifest,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestedQuestionsDto {
    pub questions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatRecordDto {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub user_message: String,
    pub bot_response: String,
    pub related_articles: Vec<RelatedArticle>,
    pub created_at: String,
}

impl From<ChatRecord> for ChatRecordDto {
    fn from(record: ChatRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            user_message: record.user_message,
            bot_response: record.bot_response,
            related_articles: record.related_articles,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryClearedDto {
    pub deleted: u64,
}
