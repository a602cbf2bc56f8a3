pub mod chat_history_repository;
pub mod knowledge_repository;
pub mod qna_repository;
pub mod user_repository;

pub use chat_history_repository::ChatHistoryRepository;
pub use knowledge_repository::KnowledgeRepository;
pub use qna_repository::QnaRepository;
pub use user_repository::UserRepository;
