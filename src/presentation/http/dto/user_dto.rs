use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::manage_users::NewUser;
use crate::domain::entities::User;
use crate::domain::value_objects::ExperienceEvent;

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub department: Option<String>,
    pub experience_points: u32,
    pub level: u32,
    pub points_to_next_level: u32,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            display_name: user.display_name().to_string(),
            department: user.department().map(str::to_string),
            experience_points: user.experience_points(),
            level: user.level(),
            points_to_next_level: user.points_to_next_level(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedUserDto {
    pub rank: usize,
    #[serde(flatten)]
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequestDto {
    pub username: String,
    pub display_name: Option<String>,
    pub department: Option<String>,
}

impl From<CreateUserRequestDto> for NewUser {
    fn from(request: CreateUserRequestDto) -> Self {
        Self {
            username: request.username,
            display_name: request.display_name,
            department: request.department,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RankingsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AwardPointsRequestDto {
    pub event: ExperienceEvent,
}
