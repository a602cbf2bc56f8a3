pub mod completion_provider;
pub mod promotion_ledger;
pub mod ranker;

pub use completion_provider::CompletionProvider;
pub use promotion_ledger::{LedgerWork, PromotionLedger, PromotionStore};
pub use ranker::{DEFAULT_TOP_K, Ranker, ScoredArticle};
