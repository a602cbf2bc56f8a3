use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::use_cases::validation::{MAX_CONTENT_CHARS, require_text};
use crate::domain::entities::QnaAnswer;
use crate::domain::repositories::QnaRepository;
use crate::domain::value_objects::{ExperienceAward, QuestionStatus};

#[derive(Debug, Clone)]
pub struct CreatedAnswer {
    pub answer: QnaAnswer,
    pub award: ExperienceAward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeStatus {
    pub like_count: i64,
    pub liked: bool,
}

pub struct ManageAnswersUseCase {
    qna_repository: Arc<dyn QnaRepository>,
}

impl ManageAnswersUseCase {
    pub fn new(qna_repository: Arc<dyn QnaRepository>) -> Self {
        Self { qna_repository }
    }

    pub async fn create(
        &self,
        question_id: Uuid,
        content: String,
        author_id: Uuid,
    ) -> Result<CreatedAnswer, UseCaseError> {
        require_text("Answer", &content, MAX_CONTENT_CHARS)?;
        if self.qna_repository.find_question(question_id).await?.is_none() {
            return Err(UseCaseError::NotFound(format!("question {}", question_id)));
        }

        let answer =
            QnaAnswer::new(question_id, content, author_id).map_err(UseCaseError::Validation)?;
        let award = self.qna_repository.create_answer(&answer).await?;

        info!("Answer {} added to question {}", answer.id(), question_id);
        Ok(CreatedAnswer { answer, award })
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor_id: Uuid,
        content: String,
    ) -> Result<QnaAnswer, UseCaseError> {
        require_text("Answer", &content, MAX_CONTENT_CHARS)?;
        let mut answer = self.written_by(id, actor_id).await?;

        answer.revise(content).map_err(UseCaseError::Validation)?;
        self.qna_repository.update_answer(&answer).await?;
        Ok(answer)
    }

    /// Deletes the answer and reports the parent question's new status.
    pub async fn delete(&self, id: Uuid, actor_id: Uuid) -> Result<QuestionStatus, UseCaseError> {
        self.written_by(id, actor_id).await?;
        let status = self.qna_repository.delete_answer(id).await?;

        info!("Answer {} deleted, question is now {}", id, status.as_str());
        Ok(status)
    }

    pub async fn like_status(
        &self,
        answer_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<LikeStatus, UseCaseError> {
        let like_count = self.qna_repository.count_likes(answer_id).await?;
        let liked = match viewer_id {
            Some(user_id) => self.qna_repository.has_liked(answer_id, user_id).await?,
            None => false,
        };
        Ok(LikeStatus { like_count, liked })
    }

    async fn written_by(&self, id: Uuid, actor_id: Uuid) -> Result<QnaAnswer, UseCaseError> {
        let answer = self
            .qna_repository
            .find_answer(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("answer {}", id)))?;

        if !answer.is_written_by(actor_id) {
            return Err(UseCaseError::Forbidden(
                "Only the author can modify this answer".to_string(),
            ));
        }
        Ok(answer)
    }
}
