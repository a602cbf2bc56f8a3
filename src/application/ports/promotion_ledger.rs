use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::{KnowledgeArticle, QnaAnswer, QnaQuestion};
use crate::domain::repositories::qna_repository::LikeToggleOutcome;
use crate::domain::value_objects::ExperienceAward;

/// Store operations the promotion engine runs inside a single transaction.
///
/// Implementations are handed out already bound to an open transaction, so
/// every call either lands together with the rest of the toggle or not at all.
pub trait PromotionLedger {
    /// Loads the answer and holds it against concurrent toggles until commit.
    fn lock_answer(&mut self, answer_id: Uuid) -> Result<Option<QnaAnswer>, StoreError>;
    fn user_exists(&mut self, user_id: Uuid) -> Result<bool, StoreError>;
    fn find_question(&mut self, question_id: Uuid) -> Result<Option<QnaQuestion>, StoreError>;

    fn has_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<bool, StoreError>;
    fn insert_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<(), StoreError>;
    fn remove_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<(), StoreError>;
    fn count_likes(&mut self, answer_id: Uuid) -> Result<i64, StoreError>;

    /// True when some article's title contains `title_fragment` and its
    /// content contains `content_fragment` (plain substring match).
    fn find_promoted_duplicate(
        &mut self,
        title_fragment: &str,
        content_fragment: &str,
    ) -> Result<bool, StoreError>;
    /// Returns false when an article promoted from the same answer already exists.
    fn insert_article(&mut self, article: &KnowledgeArticle) -> Result<bool, StoreError>;
    fn add_experience(&mut self, user_id: Uuid, delta: u32) -> Result<ExperienceAward, StoreError>;
}

pub type LedgerWork =
    Box<dyn FnOnce(&mut dyn PromotionLedger) -> Result<LikeToggleOutcome, StoreError> + Send>;

/// Opens a transaction, hands `work` a ledger bound to it and commits only
/// when `work` returns `Ok`.
#[async_trait]
pub trait PromotionStore: Send + Sync {
    async fn run_promotion(&self, work: LedgerWork) -> Result<LikeToggleOutcome, StoreError>;
}
