use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::use_cases::manage_knowledge::{CreatedKnowledge, KnowledgeDraft};
use crate::domain::entities::KnowledgeArticle;
use crate::domain::repositories::knowledge_repository::{KnowledgeQuery, KnowledgeSort};
use crate::domain::value_objects::KnowledgeType;
use crate::presentation::http::dto::ExperienceAwardDto;

#[derive(Debug, Serialize)]
pub struct KnowledgeDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub knowledge_type: String,
    pub owner_id: Option<Uuid>,
    pub view_count: i64,
    pub source_answer_id: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<KnowledgeArticle> for KnowledgeDto {
    fn from(article: KnowledgeArticle) -> Self {
        Self {
            id: article.id(),
            title: article.title().to_string(),
            content: article.content().to_string(),
            keywords: article.keywords().as_slice().to_vec(),
            knowledge_type: article.knowledge_type().as_str().to_string(),
            owner_id: article.owner_id(),
            view_count: article.view_count(),
            source_answer_id: article.source_answer_id(),
            created_at: article.created_at().to_rfc3339(),
            updated_at: article.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedKnowledgeDto {
    pub article: KnowledgeDto,
    pub award: Option<ExperienceAwardDto>,
    pub summary: String,
}

impl From<CreatedKnowledge> for CreatedKnowledgeDto {
    fn from(created: CreatedKnowledge) -> Self {
        Self {
            article: created.article.into(),
            award: created.award.map(Into::into),
            summary: created.summary,
        }
    }
}

/// Body of create and update requests. `knowledge_type` accepts the
/// English or Korean label.
#[derive(Debug, Deserialize)]
pub struct KnowledgeRequestDto {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub knowledge_type: String,
    pub owner_id: Option<Uuid>,
    pub actor_id: Option<Uuid>,
}

impl KnowledgeRequestDto {
    pub fn to_draft(&self) -> Result<KnowledgeDraft, UseCaseError> {
        Ok(KnowledgeDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            keywords: self.keywords.clone(),
            knowledge_type: KnowledgeType::from_string(&self.knowledge_type)
                .map_err(UseCaseError::Validation)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub max_length: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SummaryDto {
    pub id: Uuid,
    pub summary: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeListQuery {
    pub search: Option<String>,
    pub knowledge_type: Option<String>,
    pub sort: Option<String>,
}

impl KnowledgeListQuery {
    pub fn to_query(&self) -> Result<KnowledgeQuery, UseCaseError> {
        let knowledge_type = self
            .knowledge_type
            .as_deref()
            .filter(|t| !t.trim().is_empty() && t.trim() != "전체")
            .map(KnowledgeType::from_string)
            .transpose()
            .map_err(UseCaseError::Validation)?;
        let sort = self
            .sort
            .as_deref()
            .map(KnowledgeSort::from_string)
            .transpose()
            .map_err(UseCaseError::Validation)?
            .unwrap_or_default();

        Ok(KnowledgeQuery {
            search: self.search.clone(),
            knowledge_type,
            sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parsing() {
        let query = KnowledgeListQuery {
            search: Some("oracle".to_string()),
            knowledge_type: Some("이슈".to_string()),
            sort: Some("latest".to_string()),
        }
        .to_query()
        .unwrap();
        assert_eq!(query.knowledge_type, Some(KnowledgeType::Issue));
        assert_eq!(query.sort, KnowledgeSort::Latest);

        let all = KnowledgeListQuery {
            knowledge_type: Some("전체".to_string()),
            ..KnowledgeListQuery::default()
        }
        .to_query()
        .unwrap();
        assert!(all.knowledge_type.is_none());
        assert_eq!(all.sort, KnowledgeSort::Views);
    }

    #[test]
    fn test_unknown_type_is_a_validation_error() {
        let request: KnowledgeRequestDto = serde_json::from_value(serde_json::json!({
            "title": "t",
            "content": "c",
            "knowledge_type": "faq"
        }))
        .unwrap();
        assert!(matches!(request.to_draft(), Err(UseCaseError::Validation(_))));
    }
}
