pub mod chat_handler;
pub mod error;
pub mod knowledge_handler;
pub mod qna_handler;
pub mod user_handler;

pub use chat_handler::ChatHandler;
pub use error::{ApiFailure, ApiResult};
pub use knowledge_handler::KnowledgeHandler;
pub use qna_handler::QnaHandler;
pub use user_handler::UserHandler;
