pub mod experience;
pub mod keywords;
pub mod knowledge_type;
pub mod qna_status;

pub use experience::{ExperienceAward, ExperienceEvent};
pub use keywords::Keywords;
pub use knowledge_type::KnowledgeType;
pub use qna_status::{QuestionStatus, QuestionType};
