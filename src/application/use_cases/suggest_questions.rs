use std::sync::Arc;

use tracing::warn;

use crate::application::services::assistant_replies::{
    GENERAL_QUESTIONS, STARTER_QUESTIONS, suggested_question,
};
use crate::domain::repositories::KnowledgeRepository;

pub const SUGGESTION_COUNT: usize = 5;

/// Conversation starters built from the most viewed articles.
pub struct SuggestQuestionsUseCase {
    knowledge_repository: Arc<dyn KnowledgeRepository>,
}

impl SuggestQuestionsUseCase {
    pub fn new(knowledge_repository: Arc<dyn KnowledgeRepository>) -> Self {
        Self {
            knowledge_repository,
        }
    }

    pub async fn execute(&self) -> Vec<String> {
        match self.knowledge_repository.find_all().await {
            Ok(articles) if articles.is_empty() => owned(STARTER_QUESTIONS),
            Ok(articles) => articles
                .iter()
                .take(SUGGESTION_COUNT)
                .map(|article| suggested_question(article.title()))
                .collect(),
            Err(e) => {
                warn!("Could not read knowledge for suggestions: {}", e);
                owned(GENERAL_QUESTIONS)
            }
        }
    }
}

fn owned(questions: &[&str]) -> Vec<String> {
    questions.iter().map(|q| q.to_string()).collect()
}
