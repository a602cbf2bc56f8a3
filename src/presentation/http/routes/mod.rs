pub mod chat_routes;
pub mod health_routes;
pub mod knowledge_routes;
pub mod qna_routes;
pub mod user_routes;

pub use chat_routes::*;
pub use health_routes::*;
pub use knowledge_routes::*;
pub use qna_routes::*;
pub use user_routes::*;
