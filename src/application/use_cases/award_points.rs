use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::{ExperienceAward, ExperienceEvent};

pub struct AwardPointsUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl AwardPointsUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        event: ExperienceEvent,
    ) -> Result<ExperienceAward, UseCaseError> {
        let award = self
            .user_repository
            .award_experience(user_id, event.points())
            .await?;

        info!(
            "Awarded {} points to user {} for {:?} (total {}, level {})",
            event.points(),
            user_id,
            event,
            award.points,
            award.level
        );

        Ok(award)
    }
}
