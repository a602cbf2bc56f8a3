use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{QuestionStatus, QuestionType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnaQuestion {
    id: Uuid,
    title: String,
    body: String,
    category: String,
    question_type: QuestionType,
    questioner_id: Uuid,
    status: QuestionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QnaQuestion {
    pub fn new(
        title: String,
        body: String,
        category: String,
        question_type: QuestionType,
        questioner_id: Uuid,
    ) -> Result<Self, String> {
        if title.trim().is_empty() {
            return Err("Question title cannot be empty".to_string());
        }
        if body.trim().is_empty() {
            return Err("Question body cannot be empty".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            body,
            category,
            question_type,
            questioner_id,
            status: QuestionStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        title: String,
        body: String,
        category: String,
        question_type: QuestionType,
        questioner_id: Uuid,
        status: QuestionStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            body,
            category,
            question_type,
            questioner_id,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn questioner_id(&self) -> Uuid {
        self.questioner_id
    }

    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_asked_by(&self, user_id: Uuid) -> bool {
        self.questioner_id == user_id
    }

    pub fn set_status(&mut self, status: QuestionStatus) {
        self.status = status;
    }

    pub fn revise(
        &mut self,
        title: String,
        body: String,
        category: String,
        question_type: QuestionType,
    ) -> Result<(), String> {
        if title.trim().is_empty() {
            return Err("Question title cannot be empty".to_string());
        }
        if body.trim().is_empty() {
            return Err("Question body cannot be empty".to_string());
        }

        self.title = title;
        self.body = body;
        self.category = category;
        self.question_type = question_type;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question_is_pending() {
        let question = QnaQuestion::new(
            "DB 접속 오류".to_string(),
            "ORA-12541 가 발생합니다".to_string(),
            "데이터베이스".to_string(),
            QuestionType::Issue,
            Uuid::new_v4(),
        )
        .unwrap();

        assert_eq!(question.status(), QuestionStatus::Pending);
        assert!(question.is_asked_by(question.questioner_id()));
    }

    #[test]
    fn test_revise_rejects_blank_title() {
        let mut question = QnaQuestion::new(
            "title".to_string(),
            "body".to_string(),
            "시스템".to_string(),
            QuestionType::Manual,
            Uuid::new_v4(),
        )
        .unwrap();

        let result = question.revise(
            " ".to_string(),
            "body".to_string(),
            "시스템".to_string(),
            QuestionType::Manual,
        );
        assert!(result.is_err());
        assert_eq!(question.title(), "title");
    }
}
