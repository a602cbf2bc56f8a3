use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::services::TextAssistant;
use crate::application::services::keyword_extractor::DEFAULT_MAX_KEYWORDS;
use crate::application::services::text_assistant::DEFAULT_SUMMARY_CHARS;
use crate::application::use_cases::validation::validate_article;
use crate::domain::entities::KnowledgeArticle;
use crate::domain::repositories::KnowledgeRepository;
use crate::domain::repositories::knowledge_repository::KnowledgeQuery;
use crate::domain::value_objects::{ExperienceAward, Keywords, KnowledgeType};

#[derive(Debug, Clone)]
pub struct KnowledgeDraft {
    pub title: String,
    pub content: String,
    /// When empty, keywords are picked from the title and content.
    pub keywords: Vec<String>,
    pub knowledge_type: KnowledgeType,
}

#[derive(Debug, Clone)]
pub struct CreatedKnowledge {
    pub article: KnowledgeArticle,
    pub award: Option<ExperienceAward>,
    pub summary: String,
}

pub struct ManageKnowledgeUseCase {
    knowledge_repository: Arc<dyn KnowledgeRepository>,
    text_assistant: Arc<TextAssistant>,
}

impl ManageKnowledgeUseCase {
    pub fn new(
        knowledge_repository: Arc<dyn KnowledgeRepository>,
        text_assistant: Arc<TextAssistant>,
    ) -> Self {
        Self {
            knowledge_repository,
            text_assistant,
        }
    }

    pub async fn create(
        &self,
        draft: KnowledgeDraft,
        owner_id: Option<Uuid>,
    ) -> Result<CreatedKnowledge, UseCaseError> {
        validate_article(&draft.title, &draft.content)?;
        let keywords = self.resolve_keywords(&draft).await;

        let article = KnowledgeArticle::new(
            draft.title,
            draft.content,
            keywords,
            draft.knowledge_type,
            owner_id,
        )
        .map_err(UseCaseError::Validation)?;

        let award = self.knowledge_repository.create(&article).await?;
        info!("Created knowledge article {} ({})", article.id(), article.knowledge_type());

        let summary = self
            .text_assistant
            .summarize(article.content(), DEFAULT_SUMMARY_CHARS)
            .await;
        Ok(CreatedKnowledge {
            article,
            award,
            summary,
        })
    }

    /// Summary of an article's content. Does not count as a view.
    pub async fn summarize(&self, id: Uuid, max_chars: usize) -> Result<String, UseCaseError> {
        if max_chars < 10 {
            return Err(UseCaseError::Validation(
                "Summary length must be at least 10 characters".to_string(),
            ));
        }
        let article = self
            .knowledge_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("knowledge article {}", id)))?;

        Ok(self.text_assistant.summarize(article.content(), max_chars).await)
    }

    /// Reads an article, counting the read as a view.
    pub async fn view(&self, id: Uuid) -> Result<KnowledgeArticle, UseCaseError> {
        self.knowledge_repository.increment_view_count(id).await?;
        self.knowledge_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("knowledge article {}", id)))
    }

    pub async fn list(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeArticle>, UseCaseError> {
        Ok(self.knowledge_repository.list(query).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor_id: Uuid,
        draft: KnowledgeDraft,
    ) -> Result<KnowledgeArticle, UseCaseError> {
        validate_article(&draft.title, &draft.content)?;
        let mut article = self.owned_article(id, actor_id).await?;

        let keywords = self.resolve_keywords(&draft).await;
        article
            .revise(draft.title, draft.content, keywords, draft.knowledge_type)
            .map_err(UseCaseError::Validation)?;
        self.knowledge_repository.update(&article).await?;

        info!("Updated knowledge article {}", id);
        Ok(article)
    }

    pub async fn delete(&self, id: Uuid, actor_id: Uuid) -> Result<(), UseCaseError> {
        self.owned_article(id, actor_id).await?;
        if !self.knowledge_repository.delete(id).await? {
            return Err(UseCaseError::NotFound(format!("knowledge article {}", id)));
        }

        info!("Deleted knowledge article {}", id);
        Ok(())
    }

    async fn owned_article(
        &self,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<KnowledgeArticle, UseCaseError> {
        let article = self
            .knowledge_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("knowledge article {}", id)))?;

        if !article.is_owned_by(actor_id) {
            return Err(UseCaseError::Forbidden(
                "Only the owner can modify this article".to_string(),
            ));
        }
        Ok(article)
    }

    async fn resolve_keywords(&self, draft: &KnowledgeDraft) -> Keywords {
        let keywords = Keywords::new(draft.keywords.clone());
        if !keywords.is_empty() {
            return keywords;
        }
        self.text_assistant
            .extract_keywords(
                &format!("{} {}", draft.title, draft.content),
                DEFAULT_MAX_KEYWORDS,
            )
            .await
    }
}
