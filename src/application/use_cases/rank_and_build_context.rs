use std::sync::Arc;

use tracing::debug;

use crate::application::UseCaseError;
use crate::application::ports::Ranker;
use crate::application::services::{AssembledContext, build_context};
use crate::domain::repositories::KnowledgeRepository;

pub struct RankAndBuildContextUseCase {
    knowledge_repository: Arc<dyn KnowledgeRepository>,
    ranker: Arc<dyn Ranker>,
    top_k: usize,
    max_chars: usize,
}

impl RankAndBuildContextUseCase {
    pub fn new(
        knowledge_repository: Arc<dyn KnowledgeRepository>,
        ranker: Arc<dyn Ranker>,
        top_k: usize,
        max_chars: usize,
    ) -> Self {
        Self {
            knowledge_repository,
            ranker,
            top_k,
            max_chars,
        }
    }

    /// Ranks the whole corpus against `query` and packs the best matches into
    /// a bounded context. A store failure is returned, "no matches" is not.
    pub async fn execute(&self, query: &str) -> Result<AssembledContext, UseCaseError> {
        let corpus = self.knowledge_repository.find_all().await?;
        let ranked = self.ranker.rank(query, &corpus, self.top_k);

        debug!(
            "{} ranker kept {} of {} articles for query {:?}",
            self.ranker.name(),
            ranked.len(),
            corpus.len(),
            query
        );

        Ok(build_context(&ranked, self.max_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::DEFAULT_TOP_K;
    use crate::application::services::LexicalRanker;
    use crate::application::services::context_assembler::{
        DEFAULT_MAX_CONTEXT_CHARS, NO_CONTEXT_MESSAGE,
    };
    use crate::domain::entities::KnowledgeArticle;
    use crate::domain::value_objects::{Keywords, KnowledgeType};
    use crate::infrastructure::memory::InMemoryStore;

    async fn use_case_with(articles: &[(&str, &str, &str)]) -> RankAndBuildContextUseCase {
        let store = Arc::new(InMemoryStore::new());
        for (title, content, keywords) in articles {
            let article = KnowledgeArticle::new(
                title.to_string(),
                content.to_string(),
                Keywords::from_storage(keywords),
                KnowledgeType::Issue,
                None,
            )
            .unwrap();
            KnowledgeRepository::create(store.as_ref(), &article)
                .await
                .unwrap();
        }

        RankAndBuildContextUseCase::new(
            store,
            Arc::new(LexicalRanker::new()),
            DEFAULT_TOP_K,
            DEFAULT_MAX_CONTEXT_CHARS,
        )
    }

    #[tokio::test]
    async fn test_empty_store_yields_placeholder() {
        let use_case = use_case_with(&[]).await;
        let context = use_case.execute("oracle 접속").await.unwrap();

        assert_eq!(context.text, NO_CONTEXT_MESSAGE);
        assert!(context.manifest.is_empty());
    }

    #[tokio::test]
    async fn test_relevant_article_is_in_context() {
        let use_case = use_case_with(&[
            ("Oracle 성능 저하", "AWR 리포트로 대기 이벤트를 확인합니다", "oracle,awr"),
            ("Jenkins 배포", "파이프라인 설정 방법", "jenkins"),
        ])
        .await;

        let context = use_case.execute("oracle 성능").await.unwrap();

        assert_eq!(context.manifest.len(), 1);
        assert_eq!(context.manifest[0].title, "Oracle 성능 저하");
        assert!(context.text.starts_with("Title: Oracle 성능 저하\n"));
    }
}
