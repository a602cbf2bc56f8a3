use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::User;
use crate::domain::value_objects::ExperienceAward;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    /// Users ordered by experience, highest first.
    async fn rankings(&self, limit: i64) -> Result<Vec<User>, StoreError>;
    /// Atomically adds `delta` points and rewrites the cached level.
    async fn award_experience(&self, user_id: Uuid, delta: u32)
    -> Result<ExperienceAward, StoreError>;
}
