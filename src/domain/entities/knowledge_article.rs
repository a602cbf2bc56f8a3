use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Keywords, KnowledgeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    id: Uuid,
    title: String,
    content: String,
    keywords: Keywords,
    knowledge_type: KnowledgeType,
    owner_id: Option<Uuid>,
    view_count: i64,
    source_answer_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl KnowledgeArticle {
    pub fn new(
        title: String,
        content: String,
        keywords: Keywords,
        knowledge_type: KnowledgeType,
        owner_id: Option<Uuid>,
    ) -> Result<Self, String> {
        if title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if content.trim().is_empty() {
            return Err("Content cannot be empty".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            keywords,
            knowledge_type,
            owner_id,
            view_count: 0,
            source_answer_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds an article from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        title: String,
        content: String,
        keywords: Keywords,
        knowledge_type: KnowledgeType,
        owner_id: Option<Uuid>,
        view_count: i64,
        source_answer_id: Option<Uuid>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            keywords,
            knowledge_type,
            owner_id,
            view_count,
            source_answer_id,
            created_at,
            updated_at,
        }
    }

    pub fn promoted_from(mut self, answer_id: Uuid) -> Self {
        self.source_answer_id = Some(answer_id);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn knowledge_type(&self) -> KnowledgeType {
        self.knowledge_type
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    pub fn view_count(&self) -> i64 {
        self.view_count
    }

    pub fn source_answer_id(&self) -> Option<Uuid> {
        self.source_answer_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }

    pub fn is_promoted(&self) -> bool {
        self.source_answer_id.is_some()
    }

    pub fn record_view(&mut self) {
        self.view_count += 1;
    }

    pub fn clear_owner(&mut self) {
        self.owner_id = None;
    }

    pub fn revise(
        &mut self,
        title: String,
        content: String,
        keywords: Keywords,
        knowledge_type: KnowledgeType,
    ) -> Result<(), String> {
        if title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if content.trim().is_empty() {
            return Err("Content cannot be empty".to_string());
        }

        self.title = title;
        self.content = content;
        self.keywords = keywords;
        self.knowledge_type = knowledge_type;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Case-insensitive match over title, content and keywords.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
            || self.keywords.to_storage().to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> KnowledgeArticle {
        KnowledgeArticle::new(
            "Oracle 테이블스페이스 부족".to_string(),
            "ALTER TABLESPACE 로 데이터파일을 추가합니다.".to_string(),
            Keywords::from_storage("oracle,tablespace"),
            KnowledgeType::Issue,
            Some(Uuid::new_v4()),
        )
        .unwrap()
    }

    #[test]
    fn test_article_creation() {
        let article = article();
        assert_eq!(article.view_count(), 0);
        assert!(!article.is_promoted());
        assert_eq!(article.keywords().len(), 2);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let result = KnowledgeArticle::new(
            "  ".to_string(),
            "content".to_string(),
            Keywords::default(),
            KnowledgeType::Manual,
            None,
        );
        assert!(result.is_err());

        let result = KnowledgeArticle::new(
            "title".to_string(),
            "".to_string(),
            Keywords::default(),
            KnowledgeType::Manual,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_ownership_and_views() {
        let mut article = article();
        let owner = article.owner_id().unwrap();
        assert!(article.is_owned_by(owner));
        assert!(!article.is_owned_by(Uuid::new_v4()));

        article.record_view();
        article.record_view();
        assert_eq!(article.view_count(), 2);
    }

    #[test]
    fn test_search_matching() {
        let article = article();
        assert!(article.matches_search("ORACLE"));
        assert!(article.matches_search("데이터파일"));
        assert!(article.matches_search("tablespace"));
        assert!(!article.matches_search("mysql"));
    }
}
