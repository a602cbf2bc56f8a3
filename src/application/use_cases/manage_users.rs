use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;

pub const DEFAULT_RANKING_LIMIT: i64 = 10;
const MAX_RANKING_LIMIT: i64 = 100;
const MAX_USERNAME_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub display_name: Option<String>,
    pub department: Option<String>,
}

pub struct ManageUsersUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl ManageUsersUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn create(&self, request: NewUser) -> Result<User, UseCaseError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(UseCaseError::Validation("Username cannot be empty".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_CHARS {
            return Err(UseCaseError::Validation(format!(
                "Username must be at most {} characters",
                MAX_USERNAME_CHARS
            )));
        }
        if self.user_repository.find_by_username(&username).await?.is_some() {
            return Err(UseCaseError::Validation(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let department = request
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let user = User::new(username, request.display_name.unwrap_or_default(), department)
            .map_err(UseCaseError::Validation)?;
        self.user_repository.create(&user).await?;

        info!("Registered user {} ({})", user.username(), user.id());
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, UseCaseError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("user {}", id)))
    }

    pub async fn rankings(&self, limit: Option<i64>) -> Result<Vec<User>, UseCaseError> {
        let limit = limit.unwrap_or(DEFAULT_RANKING_LIMIT);
        if !(1..=MAX_RANKING_LIMIT).contains(&limit) {
            return Err(UseCaseError::Validation(format!(
                "Limit must be between 1 and {}",
                MAX_RANKING_LIMIT
            )));
        }
        Ok(self.user_repository.rankings(limit).await?)
    }
}
