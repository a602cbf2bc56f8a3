use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Pending,
    Answered,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStatus::Pending => "pending",
            QuestionStatus::Answered => "answered",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(QuestionStatus::Pending),
            "answered" => Ok(QuestionStatus::Answered),
            other => Err(format!("Invalid question status: {}", other)),
        }
    }

    /// Status a question settles into once its answer count is known.
    pub fn for_answer_count(count: i64) -> Self {
        if count > 0 {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Issue,
    Manual,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Issue => "issue",
            QuestionType::Manual => "manual",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "issue" | "이슈" => Ok(QuestionType::Issue),
            "manual" | "메뉴얼" | "매뉴얼" => Ok(QuestionType::Manual),
            other => Err(format!("Invalid question type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_answer_count() {
        assert_eq!(QuestionStatus::for_answer_count(0), QuestionStatus::Pending);
        assert_eq!(QuestionStatus::for_answer_count(3), QuestionStatus::Answered);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(QuestionStatus::from_string("ANSWERED").unwrap(), QuestionStatus::Answered);
        assert_eq!(QuestionType::from_string("이슈").unwrap(), QuestionType::Issue);
        assert!(QuestionType::from_string("faq").is_err());
    }
}
