use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::infrastructure::database::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub department: Option<String>,
    pub experience_points: i32,
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserModel {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub department: Option<String>,
    pub experience_points: i32,
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&User> for NewUserModel {
    type Error = String;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id(),
            username: user.username().to_string(),
            display_name: user.display_name().to_string(),
            department: user.department().map(str::to_string),
            experience_points: i32::try_from(user.experience_points())
                .map_err(|_| "experience points out of range".to_string())?,
            level: i32::try_from(user.level()).map_err(|_| "level out of range".to_string())?,
            created_at: user.created_at(),
        })
    }
}

impl TryFrom<UserModel> for User {
    type Error = String;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let experience_points = u32::try_from(model.experience_points)
            .map_err(|_| format!("Negative experience points for user {}", model.id))?;
        let level = u32::try_from(model.level)
            .map_err(|_| format!("Invalid level for user {}", model.id))?;

        Ok(User::restore(
            model.id,
            model.username,
            model.display_name,
            model.department,
            experience_points,
            level,
            model.created_at,
        ))
    }
}
