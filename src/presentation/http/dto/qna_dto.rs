use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::use_cases::manage_answers::CreatedAnswer;
use crate::application::use_cases::manage_questions::{
    CreatedQuestion, QuestionDetail, QuestionDraft,
};
use crate::domain::entities::{QnaAnswer, QnaQuestion};
use crate::domain::repositories::qna_repository::{
    AnswerView, LikeToggleOutcome, QuestionFilter, QuestionSummary,
};
use crate::domain::value_objects::{QuestionStatus, QuestionType};
use crate::presentation::http::dto::ExperienceAwardDto;

#[derive(Debug, Serialize)]
pub struct QuestionDto {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub category: String,
    pub question_type: QuestionType,
    pub questioner_id: Uuid,
    pub status: QuestionStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<QnaQuestion> for QuestionDto {
    fn from(question: QnaQuestion) -> Self {
        Self {
            id: question.id(),
            title: question.title().to_string(),
            body: question.body().to_string(),
            category: question.category().to_string(),
            question_type: question.question_type(),
            questioner_id: question.questioner_id(),
            status: question.status(),
            created_at: question.created_at().to_rfc3339(),
            updated_at: question.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionSummaryDto {
    #[serde(flatten)]
    pub question: QuestionDto,
    pub questioner_name: String,
    pub answer_count: i64,
}

impl From<QuestionSummary> for QuestionSummaryDto {
    fn from(summary: QuestionSummary) -> Self {
        Self {
            question: summary.question.into(),
            questioner_name: summary.questioner_name,
            answer_count: summary.answer_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerDto {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<QnaAnswer> for AnswerDto {
    fn from(answer: QnaAnswer) -> Self {
        Self {
            id: answer.id(),
            question_id: answer.question_id(),
            content: answer.content().to_string(),
            author_id: answer.author_id(),
            created_at: answer.created_at().to_rfc3339(),
            updated_at: answer.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerViewDto {
    #[serde(flatten)]
    pub answer: AnswerDto,
    pub author_name: String,
    pub like_count: i64,
    pub liked: bool,
}

impl From<AnswerView> for AnswerViewDto {
    fn from(view: AnswerView) -> Self {
        Self {
            answer: view.answer.into(),
            author_name: view.author_name,
            like_count: view.like_count,
            liked: view.liked_by_viewer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionDetailDto {
    pub question: QuestionDto,
    pub answers: Vec<AnswerViewDto>,
}

impl From<QuestionDetail> for QuestionDetailDto {
    fn from(detail: QuestionDetail) -> Self {
        Self {
            question: detail.question.into(),
            answers: detail.answers.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestionDto {
    pub question: QuestionDto,
    pub award: ExperienceAwardDto,
}

impl From<CreatedQuestion> for CreatedQuestionDto {
    fn from(created: CreatedQuestion) -> Self {
        Self {
            question: created.question.into(),
            award: created.award.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedAnswerDto {
    pub answer: AnswerDto,
    pub award: ExperienceAwardDto,
}

impl From<CreatedAnswer> for CreatedAnswerDto {
    fn from(created: CreatedAnswer) -> Self {
        Self {
            answer: created.answer.into(),
            award: created.award.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerDeletedDto {
    pub question_status: QuestionStatus,
}

#[derive(Debug, Serialize)]
pub struct LikeToggleDto {
    pub like_count: i64,
    pub liked: bool,
    pub promoted: bool,
    pub promoted_article_id: Option<Uuid>,
}

impl From<LikeToggleOutcome> for LikeToggleDto {
    fn from(outcome: LikeToggleOutcome) -> Self {
        Self {
            like_count: outcome.like_count,
            liked: outcome.liked,
            promoted: outcome.promoted,
            promoted_article_id: outcome.promoted_article_id,
        }
    }
}

/// Body of question create and update requests. `question_type` accepts the
/// English or Korean label.
#[derive(Debug, Deserialize)]
pub struct QuestionRequestDto {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub category: String,
    pub question_type: String,
}

impl QuestionRequestDto {
    pub fn to_draft(&self) -> Result<QuestionDraft, UseCaseError> {
        Ok(QuestionDraft {
            title: self.title.clone(),
            body: self.body.clone(),
            category: self.category.clone(),
            question_type: QuestionType::from_string(&self.question_type)
                .map_err(UseCaseError::Validation)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionFromChatRequestDto {
    pub user_id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequestDto {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct LikeRequestDto {
    pub user_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuestionListQuery {
    pub category: Option<String>,
    pub question_type: Option<String>,
}

impl QuestionListQuery {
    pub fn to_filter(&self) -> Result<QuestionFilter, UseCaseError> {
        let question_type = self
            .question_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(QuestionType::from_string)
            .transpose()
            .map_err(UseCaseError::Validation)?;

        Ok(QuestionFilter {
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
            question_type,
        })
    }
}

/// Acting user for requests without a body.
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    pub user_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_flattens_question_fields() {
        let question = QnaQuestion::new(
            "백업 실패".to_string(),
            "RMAN 오류".to_string(),
            "데이터베이스".to_string(),
            QuestionType::Issue,
            Uuid::new_v4(),
        )
        .unwrap();
        let dto = QuestionSummaryDto::from(QuestionSummary {
            question,
            questioner_name: "김철수".to_string(),
            answer_count: 2,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["title"], "백업 실패");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["question_type"], "issue");
        assert_eq!(json["answer_count"], 2);
    }

    #[test]
    fn test_filter_accepts_korean_type_label() {
        let filter = QuestionListQuery {
            category: Some(" ".to_string()),
            question_type: Some("메뉴얼".to_string()),
        }
        .to_filter()
        .unwrap();
        assert!(filter.category.is_none());
        assert_eq!(filter.question_type, Some(QuestionType::Manual));
    }
}
