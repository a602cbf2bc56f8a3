pub mod assistant_replies;
pub mod context_assembler;
pub mod keyword_extractor;
pub mod lexical_ranker;
pub mod promotion_engine;
pub mod text_assistant;

pub use context_assembler::{AssembledContext, build_context};
pub use lexical_ranker::LexicalRanker;
pub use text_assistant::TextAssistant;
