pub mod chat_record;
pub mod knowledge_article;
pub mod qna_answer;
pub mod qna_question;
pub mod user;

pub use chat_record::{ChatRecord, RelatedArticle};
pub use knowledge_article::KnowledgeArticle;
pub use qna_answer::QnaAnswer;
pub use qna_question::QnaQuestion;
pub use user::User;
