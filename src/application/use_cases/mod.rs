pub mod award_points;
pub mod chat_history;
pub mod chat_with_assistant;
pub mod manage_answers;
pub mod manage_knowledge;
pub mod manage_questions;
pub mod manage_users;
pub mod rank_and_build_context;
pub mod suggest_questions;
pub mod toggle_like;
pub mod validation;

pub use award_points::AwardPointsUseCase;
pub use chat_history::ChatHistoryUseCase;
pub use chat_with_assistant::ChatWithAssistantUseCase;
pub use manage_answers::ManageAnswersUseCase;
pub use manage_knowledge::ManageKnowledgeUseCase;
pub use manage_questions::ManageQuestionsUseCase;
pub use manage_users::ManageUsersUseCase;
pub use rank_and_build_context::RankAndBuildContextUseCase;
pub use suggest_questions::SuggestQuestionsUseCase;
pub use toggle_like::ToggleLikeUseCase;
