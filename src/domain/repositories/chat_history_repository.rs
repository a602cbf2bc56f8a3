use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::ChatRecord;

#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    async fn save(&self, record: &ChatRecord) -> Result<(), StoreError>;
    /// Newest first. `None` lists records not tied to any user.
    async fn list_by_user(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<ChatRecord>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn clear(&self, user_id: Option<Uuid>) -> Result<u64, StoreError>;
}
