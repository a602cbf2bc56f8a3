use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::{ExperienceAward, experience};
use crate::infrastructure::database::models::{NewUserModel, UserModel};
use crate::infrastructure::database::schema::users;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Fails with `NotFound` before an insert would trip the users foreign key.
pub(crate) fn require_user(conn: &mut PgConnection, user_id: Uuid) -> Result<(), StoreError> {
    let found: bool = diesel::select(exists(users::table.find(user_id))).get_result(conn)?;
    if !found {
        return Err(StoreError::not_found("user", user_id));
    }
    Ok(())
}

/// Adds `delta` points with a single read-modify-write statement, then
/// rewrites the cached level. Callers run this inside their transaction.
pub(crate) fn add_experience(
    conn: &mut PgConnection,
    user_id: Uuid,
    delta: u32,
) -> Result<ExperienceAward, StoreError> {
    let delta = i32::try_from(delta)
        .map_err(|_| StoreError::Validation(format!("Point delta {} is too large", delta)))?;

    let points: i32 = diesel::update(users::table.find(user_id))
        .set(users::experience_points.eq(users::experience_points + delta))
        .returning(users::experience_points)
        .get_result(conn)
        .optional()?
        .ok_or_else(|| StoreError::not_found("user", user_id))?;

    let points = u32::try_from(points)
        .map_err(|_| StoreError::Database(format!("Negative points for user {}", user_id)))?;
    let level = experience::level_for(points);

    diesel::update(users::table.find(user_id))
        .set(users::level.eq(level as i32))
        .execute(conn)?;

    Ok(ExperienceAward { points, level })
}

pub(crate) fn decode_user(model: UserModel) -> Result<User, StoreError> {
    User::try_from(model).map_err(StoreError::Database)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let new_user = NewUserModel::try_from(user).map_err(StoreError::Validation)?;
        let username = user.username().to_string();

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&new_user)
                .execute(conn)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::Validation(format!("Username '{}' is already taken", username))
                    }
                    other => other.into(),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        with_connection(&self.pool, move |conn| {
            users::table
                .find(id)
                .select(UserModel::as_select())
                .first(conn)
                .optional()?
                .map(decode_user)
                .transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let username = username.to_string();

        with_connection(&self.pool, move |conn| {
            users::table
                .filter(users::username.eq(username))
                .select(UserModel::as_select())
                .first(conn)
                .optional()?
                .map(decode_user)
                .transpose()
        })
        .await
    }

    async fn rankings(&self, limit: i64) -> Result<Vec<User>, StoreError> {
        with_connection(&self.pool, move |conn| {
            users::table
                .order((users::experience_points.desc(), users::created_at.asc()))
                .limit(limit)
                .select(UserModel::as_select())
                .load(conn)?
                .into_iter()
                .map(decode_user)
                .collect()
        })
        .await
    }

    async fn award_experience(
        &self,
        user_id: Uuid,
        delta: u32,
    ) -> Result<ExperienceAward, StoreError> {
        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| add_experience(conn, user_id, delta))
        })
        .await
    }
}
