use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{AwardPointsUseCase, ManageUsersUseCase};
use crate::presentation::http::dto::{
    ApiResponse, AwardPointsRequestDto, CreateUserRequestDto, ExperienceAwardDto, RankedUserDto,
    RankingsQuery, UserDto,
};
use crate::presentation::http::handlers::ApiResult;

pub struct UserHandler {
    manage_users_use_case: Arc<ManageUsersUseCase>,
    award_points_use_case: Arc<AwardPointsUseCase>,
}

impl UserHandler {
    pub fn new(
        manage_users_use_case: Arc<ManageUsersUseCase>,
        award_points_use_case: Arc<AwardPointsUseCase>,
    ) -> Self {
        Self {
            manage_users_use_case,
            award_points_use_case,
        }
    }

    pub async fn create_user(
        State(handler): State<Arc<UserHandler>>,
        Json(request): Json<CreateUserRequestDto>,
    ) -> ApiResult<UserDto> {
        let user = handler.manage_users_use_case.create(request.into()).await?;
        Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
    }

    pub async fn get_user(
        State(handler): State<Arc<UserHandler>>,
        Path(id): Path<Uuid>,
    ) -> ApiResult<UserDto> {
        let user = handler.manage_users_use_case.get(id).await?;
        Ok((StatusCode::OK, Json(ApiResponse::success(user.into()))))
    }

    pub async fn rankings(
        State(handler): State<Arc<UserHandler>>,
        Query(params): Query<RankingsQuery>,
    ) -> ApiResult<Vec<RankedUserDto>> {
        let users = handler.manage_users_use_case.rankings(params.limit).await?;

        let ranked = users
            .into_iter()
            .enumerate()
            .map(|(i, user)| RankedUserDto {
                rank: i + 1,
                user: user.into(),
            })
            .collect();
        Ok((StatusCode::OK, Json(ApiResponse::success(ranked))))
    }

    pub async fn award_points(
        State(handler): State<Arc<UserHandler>>,
        Path(id): Path<Uuid>,
        Json(request): Json<AwardPointsRequestDto>,
    ) -> ApiResult<ExperienceAwardDto> {
        let award = handler
            .award_points_use_case
            .execute(id, request.event)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(award.into()))))
    }
}
