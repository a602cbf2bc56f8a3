use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::KnowledgeArticle;
use crate::domain::value_objects::{ExperienceAward, KnowledgeType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeSort {
    /// Most viewed first, newest breaking ties.
    #[default]
    Views,
    Latest,
    Title,
}

impl KnowledgeSort {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "views" | "조회수 높은 순" => Ok(KnowledgeSort::Views),
            "latest" | "최신 순" => Ok(KnowledgeSort::Latest),
            "title" | "제목 순" => Ok(KnowledgeSort::Title),
            other => Err(format!("Invalid sort option: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeQuery {
    pub search: Option<String>,
    pub knowledge_type: Option<KnowledgeType>,
    pub sort: KnowledgeSort,
}

#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Inserts the article and, when it has an owner, awards the
    /// knowledge-created points in the same transaction.
    async fn create(
        &self,
        article: &KnowledgeArticle,
    ) -> Result<Option<ExperienceAward>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<KnowledgeArticle>, StoreError>;
    async fn list(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeArticle>, StoreError>;
    async fn increment_view_count(&self, id: Uuid) -> Result<i64, StoreError>;
    async fn update(&self, article: &KnowledgeArticle) -> Result<(), StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn count(&self) -> Result<i64, StoreError>;

    /// Whole corpus in ranking order (most viewed first).
    async fn find_all(&self) -> Result<Vec<KnowledgeArticle>, StoreError> {
        self.list(&KnowledgeQuery::default()).await
    }
}
