use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::chat_with_assistant::ChatReply;
use crate::application::use_cases::{
    ChatHistoryUseCase, ChatWithAssistantUseCase, RankAndBuildContextUseCase,
    SuggestQuestionsUseCase,
};
use crate::presentation::http::dto::{
    ApiResponse, ChatRecordDto, ChatRequestDto, ContextQuery, ContextResponseDto,
    HistoryClearedDto, HistoryQuery, MessageResponseDto, SuggestedQuestionsDto,
};
use crate::presentation::http::handlers::ApiResult;

pub struct ChatHandler {
    context_use_case: Arc<RankAndBuildContextUseCase>,
    chat_use_case: Arc<ChatWithAssistantUseCase>,
    history_use_case: Arc<ChatHistoryUseCase>,
    suggest_use_case: Arc<SuggestQuestionsUseCase>,
}

impl ChatHandler {
    pub fn new(
        context_use_case: Arc<RankAndBuildContextUseCase>,
        chat_use_case: Arc<ChatWithAssistantUseCase>,
        history_use_case: Arc<ChatHistoryUseCase>,
        suggest_use_case: Arc<SuggestQuestionsUseCase>,
    ) -> Self {
        Self {
            context_use_case,
            chat_use_case,
            history_use_case,
            suggest_use_case,
        }
    }

    pub async fn build_context(
        State(handler): State<Arc<ChatHandler>>,
        Query(params): Query<ContextQuery>,
    ) -> ApiResult<ContextResponseDto> {
        let context = handler.context_use_case.execute(&params.query).await?;
        Ok((StatusCode::OK, Json(ApiResponse::success(context.into()))))
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        Json(request): Json<ChatRequestDto>,
    ) -> ApiResult<ChatReply> {
        let reply = handler.chat_use_case.execute(request.into()).await?;
        Ok((StatusCode::OK, Json(ApiResponse::success(reply))))
    }

    pub async fn suggested_questions(
        State(handler): State<Arc<ChatHandler>>,
    ) -> ApiResult<SuggestedQuestionsDto> {
        let questions = handler.suggest_use_case.execute().await;
        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(SuggestedQuestionsDto { questions })),
        ))
    }

    pub async fn list_history(
        State(handler): State<Arc<ChatHandler>>,
        Query(params): Query<HistoryQuery>,
    ) -> ApiResult<Vec<ChatRecordDto>> {
        let records = handler
            .history_use_case
            .list(params.user_id, params.limit)
            .await?;

        let dtos = records.into_iter().map(ChatRecordDto::from).collect();
        Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
    }

    pub async fn clear_history(
        State(handler): State<Arc<ChatHandler>>,
        Query(params): Query<HistoryQuery>,
    ) -> ApiResult<HistoryClearedDto> {
        let deleted = handler.history_use_case.clear(params.user_id).await?;
        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(HistoryClearedDto { deleted })),
        ))
    }

    pub async fn delete_history_record(
        State(handler): State<Arc<ChatHandler>>,
        Path(id): Path<Uuid>,
    ) -> ApiResult<MessageResponseDto> {
        handler.history_use_case.delete(id).await?;

        let message = MessageResponseDto {
            message: format!("Chat record {} deleted", id),
        };
        Ok((StatusCode::OK, Json(ApiResponse::success(message))))
    }
}
