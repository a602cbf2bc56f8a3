use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::KnowledgeArticle;
use crate::domain::value_objects::{Keywords, KnowledgeType};
use crate::infrastructure::database::schema::knowledge_articles;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = knowledge_articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct KnowledgeModel {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub knowledge_type: String,
    pub owner_id: Option<Uuid>,
    pub view_count: i64,
    pub source_answer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = knowledge_articles)]
pub struct NewKnowledgeModel {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub knowledge_type: String,
    pub owner_id: Option<Uuid>,
    pub view_count: i64,
    pub source_answer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable columns only; views, owner and provenance are never rewritten here.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = knowledge_articles)]
pub struct UpdateKnowledgeModel {
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub knowledge_type: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&KnowledgeArticle> for NewKnowledgeModel {
    fn from(article: &KnowledgeArticle) -> Self {
        Self {
            id: article.id(),
            title: article.title().to_string(),
            content: article.content().to_string(),
            keywords: article.keywords().to_storage(),
            knowledge_type: article.knowledge_type().as_str().to_string(),
            owner_id: article.owner_id(),
            view_count: article.view_count(),
            source_answer_id: article.source_answer_id(),
            created_at: article.created_at(),
            updated_at: article.updated_at(),
        }
    }
}

impl From<&KnowledgeArticle> for UpdateKnowledgeModel {
    fn from(article: &KnowledgeArticle) -> Self {
        Self {
            title: article.title().to_string(),
            content: article.content().to_string(),
            keywords: article.keywords().to_storage(),
            knowledge_type: article.knowledge_type().as_str().to_string(),
            updated_at: article.updated_at(),
        }
    }
}

impl TryFrom<KnowledgeModel> for KnowledgeArticle {
    type Error = String;

    fn try_from(model: KnowledgeModel) -> Result<Self, Self::Error> {
        let knowledge_type = KnowledgeType::from_string(&model.knowledge_type)?;

        Ok(KnowledgeArticle::restore(
            model.id,
            model.title,
            model.content,
            Keywords::from_storage(&model.keywords),
            knowledge_type,
            model.owner_id,
            model.view_count,
            model.source_answer_id,
            model.created_at,
            model.updated_at,
        ))
    }
}
