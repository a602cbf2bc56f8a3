pub mod container;
pub mod database;
pub mod external_services;
pub mod memory;

pub use container::{AppContainer, ContainerError};
pub use database::{DbPool, create_connection_pool};
pub use memory::InMemoryStore;
