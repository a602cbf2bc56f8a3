pub mod chat_record_model;
pub mod knowledge_model;
pub mod qna_model;
pub mod user_model;

pub use chat_record_model::*;
pub use knowledge_model::*;
pub use qna_model::*;
pub use user_model::*;
