use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::services::text_assistant::DEFAULT_SUMMARY_CHARS;
use crate::application::use_cases::ManageKnowledgeUseCase;
use crate::presentation::http::dto::{
    ActorQuery, ApiResponse, CreatedKnowledgeDto, KnowledgeDto, KnowledgeListQuery,
    KnowledgeRequestDto, MessageResponseDto, SummaryDto, SummaryQuery,
};
use crate::presentation::http::handlers::ApiResult;

pub struct KnowledgeHandler {
    manage_knowledge_use_case: Arc<ManageKnowledgeUseCase>,
}

impl KnowledgeHandler {
    pub fn new(manage_knowledge_use_case: Arc<ManageKnowledgeUseCase>) -> Self {
        Self {
            manage_knowledge_use_case,
        }
    }

    pub async fn create_knowledge(
        State(handler): State<Arc<KnowledgeHandler>>,
        Json(request): Json<KnowledgeRequestDto>,
    ) -> ApiResult<CreatedKnowledgeDto> {
        let draft = request.to_draft()?;
        let created = handler
            .manage_knowledge_use_case
            .create(draft, request.owner_id)
            .await?;

        Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
    }

    pub async fn list_knowledge(
        State(handler): State<Arc<KnowledgeHandler>>,
        Query(params): Query<KnowledgeListQuery>,
    ) -> ApiResult<Vec<KnowledgeDto>> {
        let articles = handler
            .manage_knowledge_use_case
            .list(&params.to_query()?)
            .await?;

        let dtos = articles.into_iter().map(KnowledgeDto::from).collect();
        Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
    }

    // Counts as a view
    pub async fn get_knowledge(
        State(handler): State<Arc<KnowledgeHandler>>,
        Path(id): Path<Uuid>,
    ) -> ApiResult<KnowledgeDto> {
        let article = handler.manage_knowledge_use_case.view(id).await?;
        Ok((StatusCode::OK, Json(ApiResponse::success(article.into()))))
    }

    pub async fn summarize_knowledge(
        State(handler): State<Arc<KnowledgeHandler>>,
        Path(id): Path<Uuid>,
        Query(params): Query<SummaryQuery>,
    ) -> ApiResult<SummaryDto> {
        let summary = handler
            .manage_knowledge_use_case
            .summarize(id, params.max_length.unwrap_or(DEFAULT_SUMMARY_CHARS))
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(SummaryDto { id, summary }))))
    }

    pub async fn update_knowledge(
        State(handler): State<Arc<KnowledgeHandler>>,
        Path(id): Path<Uuid>,
        Json(request): Json<KnowledgeRequestDto>,
    ) -> ApiResult<KnowledgeDto> {
        let actor_id = request
            .actor_id
            .ok_or_else(|| UseCaseError::Validation("actor_id is required".to_string()))?;
        let article = handler
            .manage_knowledge_use_case
            .update(id, actor_id, request.to_draft()?)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(article.into()))))
    }

    pub async fn delete_knowledge(
        State(handler): State<Arc<KnowledgeHandler>>,
        Path(id): Path<Uuid>,
        Query(actor): Query<ActorQuery>,
    ) -> ApiResult<MessageResponseDto> {
        handler
            .manage_knowledge_use_case
            .delete(id, actor.user_id)
            .await?;

        let message = MessageResponseDto {
            message: format!("Knowledge article {} deleted", id),
        };
        Ok((StatusCode::OK, Json(ApiResponse::success(message))))
    }
}
