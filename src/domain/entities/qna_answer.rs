use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnaAnswer {
    id: Uuid,
    question_id: Uuid,
    content: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QnaAnswer {
    pub fn new(question_id: Uuid, content: String, author_id: Uuid) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Err("Answer content cannot be empty".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            question_id,
            content,
            author_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(
        id: Uuid,
        question_id: Uuid,
        content: String,
        author_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            question_id,
            content,
            author_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn question_id(&self) -> Uuid {
        self.question_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_written_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    pub fn revise(&mut self, content: String) -> Result<(), String> {
        if content.trim().is_empty() {
            return Err("Answer content cannot be empty".to_string());
        }
        self.content = content;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Leading characters used to recognise an already promoted answer.
    pub fn fingerprint(&self, chars: usize) -> String {
        self.content.chars().take(chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answer_rejected() {
        assert!(QnaAnswer::new(Uuid::new_v4(), "\n ".to_string(), Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_fingerprint_counts_characters() {
        let answer = QnaAnswer::new(
            Uuid::new_v4(),
            "리스너를 재시작하세요".to_string(),
            Uuid::new_v4(),
        )
        .unwrap();

        assert_eq!(answer.fingerprint(3), "리스너");
        assert_eq!(answer.fingerprint(50), "리스너를 재시작하세요");
    }
}
