pub mod chat_dto;
pub mod knowledge_dto;
pub mod qna_dto;
pub mod response_dto;
pub mod user_dto;

pub use chat_dto::*;
pub use knowledge_dto::*;
pub use qna_dto::*;
pub use response_dto::*;
pub use user_dto::*;
