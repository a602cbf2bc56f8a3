use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::use_cases::validation::{MAX_CONTENT_CHARS, MAX_TITLE_CHARS, require_text};
use crate::domain::entities::QnaQuestion;
use crate::domain::repositories::QnaRepository;
use crate::domain::repositories::qna_repository::{AnswerView, QuestionFilter, QuestionSummary};
use crate::domain::value_objects::{ExperienceAward, QuestionType};

/// Category used for questions raised from the assistant.
pub const CHAT_QUESTION_CATEGORY: &str = "데이터베이스";
const CHAT_TITLE_CHARS: usize = 20;

#[derive(Debug, Clone)]
pub struct QuestionDraft {
    pub title: String,
    pub body: String,
    pub category: String,
    pub question_type: QuestionType,
}

#[derive(Debug, Clone)]
pub struct CreatedQuestion {
    pub question: QnaQuestion,
    pub award: ExperienceAward,
}

#[derive(Debug, Clone)]
pub struct QuestionDetail {
    pub question: QnaQuestion,
    pub answers: Vec<AnswerView>,
}

pub struct ManageQuestionsUseCase {
    qna_repository: Arc<dyn QnaRepository>,
}

impl ManageQuestionsUseCase {
    pub fn new(qna_repository: Arc<dyn QnaRepository>) -> Self {
        Self { qna_repository }
    }

    pub async fn create(
        &self,
        draft: QuestionDraft,
        questioner_id: Uuid,
    ) -> Result<CreatedQuestion, UseCaseError> {
        validate_question(&draft)?;

        let question = QnaQuestion::new(
            draft.title,
            draft.body,
            draft.category,
            draft.question_type,
            questioner_id,
        )
        .map_err(UseCaseError::Validation)?;

        let award = self.qna_repository.create_question(&question).await?;
        info!("Question {} created by {}", question.id(), questioner_id);

        Ok(CreatedQuestion { question, award })
    }

    /// Files a chat message the assistant could not answer as a new question.
    pub async fn create_from_chat(
        &self,
        message: &str,
        questioner_id: Uuid,
    ) -> Result<CreatedQuestion, UseCaseError> {
        let message = message.trim();
        let draft = QuestionDraft {
            title: chat_title(message),
            body: message.to_string(),
            category: CHAT_QUESTION_CATEGORY.to_string(),
            question_type: QuestionType::Issue,
        };
        self.create(draft, questioner_id).await
    }

    pub async fn list(&self, filter: &QuestionFilter) -> Result<Vec<QuestionSummary>, UseCaseError> {
        Ok(self.qna_repository.list_questions(filter).await?)
    }

    pub async fn detail(
        &self,
        id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<QuestionDetail, UseCaseError> {
        let question = self.find(id).await?;
        let answers = self.qna_repository.list_answers(id, viewer_id).await?;
        Ok(QuestionDetail { question, answers })
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor_id: Uuid,
        draft: QuestionDraft,
    ) -> Result<QnaQuestion, UseCaseError> {
        validate_question(&draft)?;
        let mut question = self.asked_by(id, actor_id).await?;

        question
            .revise(draft.title, draft.body, draft.category, draft.question_type)
            .map_err(UseCaseError::Validation)?;
        self.qna_repository.update_question(&question).await?;

        Ok(question)
    }

    pub async fn delete(&self, id: Uuid, actor_id: Uuid) -> Result<(), UseCaseError> {
        self.asked_by(id, actor_id).await?;
        if !self.qna_repository.delete_question(id).await? {
            return Err(UseCaseError::NotFound(format!("question {}", id)));
        }

        info!("Question {} deleted by {}", id, actor_id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<QnaQuestion, UseCaseError> {
        self.qna_repository
            .find_question(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("question {}", id)))
    }

    async fn asked_by(&self, id: Uuid, actor_id: Uuid) -> Result<QnaQuestion, UseCaseError> {
        let question = self.find(id).await?;
        if !question.is_asked_by(actor_id) {
            return Err(UseCaseError::Forbidden(
                "Only the questioner can modify this question".to_string(),
            ));
        }
        Ok(question)
    }
}

fn validate_question(draft: &QuestionDraft) -> Result<(), UseCaseError> {
    require_text("Title", &draft.title, MAX_TITLE_CHARS)?;
    require_text("Body", &draft.body, MAX_CONTENT_CHARS)
}

fn chat_title(message: &str) -> String {
    let mut title: String = message.chars().take(CHAT_TITLE_CHARS).collect();
    if message.chars().count() > CHAT_TITLE_CHARS {
        title.push_str("...");
    }
    title
}
