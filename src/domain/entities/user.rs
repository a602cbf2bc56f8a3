use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ExperienceAward, experience};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    username: String,
    display_name: String,
    department: Option<String>,
    experience_points: u32,
    level: u32,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        display_name: String,
        department: Option<String>,
    ) -> Result<Self, String> {
        if username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        let display_name = if display_name.trim().is_empty() {
            username.clone()
        } else {
            display_name
        };

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            display_name,
            department,
            experience_points: 0,
            level: 1,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: Uuid,
        username: String,
        display_name: String,
        department: Option<String>,
        experience_points: u32,
        level: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            display_name,
            department,
            experience_points,
            level,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn experience_points(&self) -> u32 {
        self.experience_points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn apply_award(&mut self, delta: u32) -> ExperienceAward {
        let award = experience::award(self.experience_points, delta);
        self.experience_points = award.points;
        self.level = award.level;
        award
    }

    /// Points still missing before the next level is reached.
    pub fn points_to_next_level(&self) -> u32 {
        let next_threshold = self.level * self.level * 100;
        next_threshold.saturating_sub(self.experience_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_at_level_one() {
        let user = User::new("kim".to_string(), "".to_string(), None).unwrap();
        assert_eq!(user.level(), 1);
        assert_eq!(user.experience_points(), 0);
        assert_eq!(user.display_name(), "kim");
    }

    #[test]
    fn test_apply_award_keeps_level_cache_consistent() {
        let mut user = User::new("lee".to_string(), "이영희".to_string(), Some("인프라팀".to_string())).unwrap();
        user.apply_award(95);
        assert_eq!(user.level(), 1);
        assert_eq!(user.points_to_next_level(), 5);

        let award = user.apply_award(5);
        assert_eq!(award, ExperienceAward { points: 100, level: 2 });
        assert_eq!(user.level(), 2);
        assert_eq!(user.points_to_next_level(), 300);
    }

    #[test]
    fn test_blank_username_rejected() {
        assert!(User::new(" ".to_string(), "x".to_string(), None).is_err());
    }
}
