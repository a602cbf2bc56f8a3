use serde::{Deserialize, Serialize};

/// Question categories that are filed as operational issues when promoted.
pub const ISSUE_CATEGORIES: [&str; 3] = ["데이터베이스", "서버", "오류"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeType {
    Issue,
    Manual,
}

impl KnowledgeType {
    pub fn for_category(category: &str) -> Self {
        if ISSUE_CATEGORIES.contains(&category.trim()) {
            KnowledgeType::Issue
        } else {
            KnowledgeType::Manual
        }
    }

    /// Label persisted in the `knowledge_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeType::Issue => "이슈",
            KnowledgeType::Manual => "메뉴얼",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "이슈" | "issue" => Ok(KnowledgeType::Issue),
            "메뉴얼" | "매뉴얼" | "manual" => Ok(KnowledgeType::Manual),
            other => Err(format!("Invalid knowledge type: {}", other)),
        }
    }
}

impl std::fmt::Display for KnowledgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
