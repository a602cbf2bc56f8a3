use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::manage_answers::LikeStatus;
use crate::application::use_cases::{ManageAnswersUseCase, ManageQuestionsUseCase, ToggleLikeUseCase};
use crate::presentation::http::dto::{
    ActorQuery, AnswerDeletedDto, AnswerDto, AnswerRequestDto, ApiResponse, CreatedAnswerDto,
    CreatedQuestionDto, LikeRequestDto, LikeToggleDto, MessageResponseDto, QuestionDetailDto,
    QuestionDto, QuestionFromChatRequestDto, QuestionListQuery, QuestionRequestDto,
    QuestionSummaryDto, ViewerQuery,
};
use crate::presentation::http::handlers::ApiResult;

pub struct QnaHandler {
    manage_questions_use_case: Arc<ManageQuestionsUseCase>,
    manage_answers_use_case: Arc<ManageAnswersUseCase>,
    toggle_like_use_case: Arc<ToggleLikeUseCase>,
}

impl QnaHandler {
    pub fn new(
        manage_questions_use_case: Arc<ManageQuestionsUseCase>,
        manage_answers_use_case: Arc<ManageAnswersUseCase>,
        toggle_like_use_case: Arc<ToggleLikeUseCase>,
    ) -> Self {
        Self {
            manage_questions_use_case,
            manage_answers_use_case,
            toggle_like_use_case,
        }
    }

    pub async fn create_question(
        State(handler): State<Arc<QnaHandler>>,
        Json(request): Json<QuestionRequestDto>,
    ) -> ApiResult<CreatedQuestionDto> {
        let created = handler
            .manage_questions_use_case
            .create(request.to_draft()?, request.user_id)
            .await?;

        Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
    }

    pub async fn create_question_from_chat(
        State(handler): State<Arc<QnaHandler>>,
        Json(request): Json<QuestionFromChatRequestDto>,
    ) -> ApiResult<CreatedQuestionDto> {
        let created = handler
            .manage_questions_use_case
            .create_from_chat(&request.message, request.user_id)
            .await?;

        Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
    }

    pub async fn list_questions(
        State(handler): State<Arc<QnaHandler>>,
        Query(params): Query<QuestionListQuery>,
    ) -> ApiResult<Vec<QuestionSummaryDto>> {
        let summaries = handler
            .manage_questions_use_case
            .list(&params.to_filter()?)
            .await?;

        let dtos = summaries.into_iter().map(QuestionSummaryDto::from).collect();
        Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
    }

    pub async fn get_question(
        State(handler): State<Arc<QnaHandler>>,
        Path(id): Path<Uuid>,
        Query(viewer): Query<ViewerQuery>,
    ) -> ApiResult<QuestionDetailDto> {
        let detail = handler
            .manage_questions_use_case
            .detail(id, viewer.user_id)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(detail.into()))))
    }

    pub async fn update_question(
        State(handler): State<Arc<QnaHandler>>,
        Path(id): Path<Uuid>,
        Json(request): Json<QuestionRequestDto>,
    ) -> ApiResult<QuestionDto> {
        let question = handler
            .manage_questions_use_case
            .update(id, request.user_id, request.to_draft()?)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(question.into()))))
    }

    pub async fn delete_question(
        State(handler): State<Arc<QnaHandler>>,
        Path(id): Path<Uuid>,
        Query(actor): Query<ActorQuery>,
    ) -> ApiResult<MessageResponseDto> {
        handler
            .manage_questions_use_case
            .delete(id, actor.user_id)
            .await?;

        let message = MessageResponseDto {
            message: format!("Question {} deleted", id),
        };
        Ok((StatusCode::OK, Json(ApiResponse::success(message))))
    }

    pub async fn create_answer(
        State(handler): State<Arc<QnaHandler>>,
        Path(question_id): Path<Uuid>,
        Json(request): Json<AnswerRequestDto>,
    ) -> ApiResult<CreatedAnswerDto> {
        let created = handler
            .manage_answers_use_case
            .create(question_id, request.content, request.user_id)
            .await?;

        Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
    }

    pub async fn update_answer(
        State(handler): State<Arc<QnaHandler>>,
        Path(id): Path<Uuid>,
        Json(request): Json<AnswerRequestDto>,
    ) -> ApiResult<AnswerDto> {
        let answer = handler
            .manage_answers_use_case
            .update(id, request.user_id, request.content)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(answer.into()))))
    }

    pub async fn delete_answer(
        State(handler): State<Arc<QnaHandler>>,
        Path(id): Path<Uuid>,
        Query(actor): Query<ActorQuery>,
    ) -> ApiResult<AnswerDeletedDto> {
        let question_status = handler
            .manage_answers_use_case
            .delete(id, actor.user_id)
            .await?;

        Ok((
            StatusCode::OK,
            Json(ApiResponse::success(AnswerDeletedDto { question_status })),
        ))
    }

    pub async fn toggle_like(
        State(handler): State<Arc<QnaHandler>>,
        Path(answer_id): Path<Uuid>,
        Json(request): Json<LikeRequestDto>,
    ) -> ApiResult<LikeToggleDto> {
        let outcome = handler
            .toggle_like_use_case
            .execute(answer_id, request.user_id)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(outcome.into()))))
    }

    pub async fn like_status(
        State(handler): State<Arc<QnaHandler>>,
        Path(answer_id): Path<Uuid>,
        Query(viewer): Query<ViewerQuery>,
    ) -> ApiResult<LikeStatus> {
        let status = handler
            .manage_answers_use_case
            .like_status(answer_id, viewer.user_id)
            .await?;

        Ok((StatusCode::OK, Json(ApiResponse::success(status))))
    }
}
