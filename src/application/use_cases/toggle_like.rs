use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::ports::{PromotionLedger, PromotionStore};
use crate::application::services::promotion_engine;
use crate::domain::repositories::qna_repository::LikeToggleOutcome;

pub struct ToggleLikeUseCase {
    promotion_store: Arc<dyn PromotionStore>,
}

impl ToggleLikeUseCase {
    pub fn new(promotion_store: Arc<dyn PromotionStore>) -> Self {
        Self { promotion_store }
    }

    pub async fn execute(
        &self,
        answer_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeToggleOutcome, UseCaseError> {
        let outcome = self
            .promotion_store
            .run_promotion(Box::new(move |ledger: &mut dyn PromotionLedger| {
                promotion_engine::toggle_like(ledger, answer_id, user_id)
            }))
            .await?;

        if let Some(article_id) = outcome.promoted_article_id {
            info!("Answer {} promoted to knowledge article {}", answer_id, article_id);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{QnaAnswer, QnaQuestion, User};
    use crate::domain::repositories::{KnowledgeRepository, QnaRepository, UserRepository};
    use crate::domain::value_objects::QuestionType;
    use crate::infrastructure::memory::InMemoryStore;

    async fn seeded() -> (Arc<InMemoryStore>, Uuid, Uuid, Vec<Uuid>) {
        let store = Arc::new(InMemoryStore::new());
        let mut ids = Vec::new();
        for name in ["asker", "author", "fan1", "fan2", "fan3"] {
            let user = User::new(name.to_string(), String::new(), None).unwrap();
            ids.push(user.id());
            UserRepository::create(store.as_ref(), &user).await.unwrap();
        }

        let question = QnaQuestion::new(
            "Redis 메모리 초과".to_string(),
            "maxmemory 경고가 계속 발생합니다".to_string(),
            "서버".to_string(),
            QuestionType::Issue,
            ids[0],
        )
        .unwrap();
        store.create_question(&question).await.unwrap();

        let answer = QnaAnswer::new(
            question.id(),
            "maxmemory-policy 를 allkeys-lru 로 바꾸세요".to_string(),
            ids[1],
        )
        .unwrap();
        store.create_answer(&answer).await.unwrap();

        (store, answer.id(), ids[1], ids[2..].to_vec())
    }

    #[tokio::test]
    async fn test_second_like_promotes_and_awards() {
        let (store, answer_id, author_id, fans) = seeded().await;
        let use_case = ToggleLikeUseCase::new(store.clone());

        let first = use_case.execute(answer_id, fans[0]).await.unwrap();
        assert!(!first.promoted);

        let second = use_case.execute(answer_id, fans[1]).await.unwrap();
        assert!(second.promoted);
        assert_eq!(second.like_count, 2);

        let third = use_case.execute(answer_id, fans[2]).await.unwrap();
        assert!(!third.promoted);

        assert_eq!(KnowledgeRepository::count(store.as_ref()).await.unwrap(), 1);
        let author = UserRepository::find_by_id(store.as_ref(), author_id).await.unwrap().unwrap();
        // +3 for answering, +10 for the promotion
        assert_eq!(author.experience_points(), 13);
    }

    #[tokio::test]
    async fn test_unknown_answer_is_not_found() {
        let (store, _, _, fans) = seeded().await;
        let use_case = ToggleLikeUseCase::new(store);

        let result = use_case.execute(Uuid::new_v4(), fans[0]).await;
        assert!(matches!(result, Err(UseCaseError::NotFound(_))));
    }
}
