use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::domain::entities::ChatRecord;
use crate::domain::repositories::ChatHistoryRepository;

pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 500;

pub struct ChatHistoryUseCase {
    chat_history_repository: Arc<dyn ChatHistoryRepository>,
}

impl ChatHistoryUseCase {
    pub fn new(chat_history_repository: Arc<dyn ChatHistoryRepository>) -> Self {
        Self {
            chat_history_repository,
        }
    }

    pub async fn list(
        &self,
        user_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<ChatRecord>, UseCaseError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            return Err(UseCaseError::Validation(format!(
                "Limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            )));
        }
        Ok(self.chat_history_repository.list_by_user(user_id, limit).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), UseCaseError> {
        if !self.chat_history_repository.delete(id).await? {
            return Err(UseCaseError::NotFound(format!("chat record {}", id)));
        }
        Ok(())
    }

    pub async fn clear(&self, user_id: Option<Uuid>) -> Result<u64, UseCaseError> {
        let removed = self.chat_history_repository.clear(user_id).await?;
        info!("Cleared {} chat records", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryStore;

    #[tokio::test]
    async fn test_list_delete_and_clear() {
        let store = Arc::new(InMemoryStore::new());
        let use_case = ChatHistoryUseCase::new(store.clone());
        let user = Some(Uuid::new_v4());

        let first = ChatRecord::new(user, "q1".to_string(), "a1".to_string(), Vec::new());
        let second = ChatRecord::new(user, "q2".to_string(), "a2".to_string(), Vec::new());
        let other = ChatRecord::new(None, "q3".to_string(), "a3".to_string(), Vec::new());
        for record in [&first, &second, &other] {
            store.save(record).await.unwrap();
        }

        let listed = use_case.list(user, None).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].user_message, "q2");

        use_case.delete(first.id).await.unwrap();
        assert!(matches!(
            use_case.delete(first.id).await,
            Err(UseCaseError::NotFound(_))
        ));

        assert_eq!(use_case.clear(user).await.unwrap(), 1);
        assert!(use_case.list(user, None).await.unwrap().is_empty());
        assert_eq!(use_case.list(None, Some(10)).await.unwrap().len(), 1);
    }
}
