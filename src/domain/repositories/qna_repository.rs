use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::{QnaAnswer, QnaQuestion};
use crate::domain::value_objects::{ExperienceAward, QuestionStatus, QuestionType};

#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub category: Option<String>,
    pub question_type: Option<QuestionType>,
}

#[derive(Debug, Clone)]
pub struct QuestionSummary {
    pub question: QnaQuestion,
    pub questioner_name: String,
    pub answer_count: i64,
}

#[derive(Debug, Clone)]
pub struct AnswerView {
    pub answer: QnaAnswer,
    pub author_name: String,
    pub like_count: i64,
    pub liked_by_viewer: bool,
}

/// Result of a like toggle, including whether this toggle promoted the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggleOutcome {
    pub like_count: i64,
    pub liked: bool,
    pub promoted: bool,
    pub promoted_article_id: Option<Uuid>,
}

#[async_trait]
pub trait QnaRepository: Send + Sync {
    /// Inserts the question and awards the questioner in one transaction.
    async fn create_question(&self, question: &QnaQuestion) -> Result<ExperienceAward, StoreError>;
    async fn find_question(&self, id: Uuid) -> Result<Option<QnaQuestion>, StoreError>;
    async fn list_questions(&self, filter: &QuestionFilter)
    -> Result<Vec<QuestionSummary>, StoreError>;
    async fn update_question(&self, question: &QnaQuestion) -> Result<(), StoreError>;
    async fn delete_question(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Inserts the answer, marks the question answered and awards the author.
    async fn create_answer(&self, answer: &QnaAnswer) -> Result<ExperienceAward, StoreError>;
    async fn find_answer(&self, id: Uuid) -> Result<Option<QnaAnswer>, StoreError>;
    async fn list_answers(
        &self,
        question_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<AnswerView>, StoreError>;
    async fn update_answer(&self, answer: &QnaAnswer) -> Result<(), StoreError>;
    /// Deletes the answer and returns the parent question's resulting status.
    async fn delete_answer(&self, id: Uuid) -> Result<QuestionStatus, StoreError>;

    async fn count_likes(&self, answer_id: Uuid) -> Result<i64, StoreError>;
    async fn has_liked(&self, answer_id: Uuid, user_id: Uuid) -> Result<bool, StoreError>;
}
