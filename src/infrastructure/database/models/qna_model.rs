use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{QnaAnswer, QnaQuestion};
use crate::domain::value_objects::{QuestionStatus, QuestionType};
use crate::infrastructure::database::schema::{answer_likes, qna_answers, qna_questions};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = qna_questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuestionModel {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub category: String,
    pub question_type: String,
    pub questioner_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = qna_questions)]
pub struct NewQuestionModel {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub category: String,
    pub question_type: String,
    pub questioner_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = qna_answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnswerModel {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = qna_answers)]
pub struct NewAnswerModel {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = answer_likes)]
pub struct NewLikeModel {
    pub id: Uuid,
    pub answer_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl NewLikeModel {
    pub fn new(answer_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            answer_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

impl From<&QnaQuestion> for NewQuestionModel {
    fn from(question: &QnaQuestion) -> Self {
        Self {
            id: question.id(),
            title: question.title().to_string(),
            body: question.body().to_string(),
            category: question.category().to_string(),
            question_type: question.question_type().as_str().to_string(),
            questioner_id: question.questioner_id(),
            status: question.status().as_str().to_string(),
            created_at: question.created_at(),
            updated_at: question.updated_at(),
        }
    }
}

impl TryFrom<QuestionModel> for QnaQuestion {
    type Error = String;

    fn try_from(model: QuestionModel) -> Result<Self, Self::Error> {
        Ok(QnaQuestion::restore(
            model.id,
            model.title,
            model.body,
            model.category,
            QuestionType::from_string(&model.question_type)?,
            model.questioner_id,
            QuestionStatus::from_string(&model.status)?,
            model.created_at,
            model.updated_at,
        ))
    }
}

impl From<&QnaAnswer> for NewAnswerModel {
    fn from(answer: &QnaAnswer) -> Self {
        Self {
            id: answer.id(),
            question_id: answer.question_id(),
            content: answer.content().to_string(),
            author_id: answer.author_id(),
            created_at: answer.created_at(),
            updated_at: answer.updated_at(),
        }
    }
}

impl From<AnswerModel> for QnaAnswer {
    fn from(model: AnswerModel) -> Self {
        QnaAnswer::restore(
            model.id,
            model.question_id,
            model.content,
            model.author_id,
            model.created_at,
            model.updated_at,
        )
    }
}
