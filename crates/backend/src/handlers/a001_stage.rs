use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_stage::aggregate::{Stage, StageDto, StagePatch};
use contracts::shared::api::MessageResponse;

use crate::domain::a001_stage;
use crate::shared::error::AppError;
use crate::shared::state::AppState;

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::MalformedPayload(rejection.body_text()))
}

/// POST /api/stages
#[utoipa::path(
    post,
    path = "/api/stages",
    tag = "Stages",
    request_body = StageDto,
    responses(
        (status = 201, description = "The stage was successfully created", body = Stage),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<StageDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Stage>), AppError> {
    let dto = payload(body)?;
    let stage = a001_stage::service::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(stage)))
}

/// GET /api/stages
#[utoipa::path(
    get,
    path = "/api/stages",
    tag = "Stages",
    responses(
        (status = 200, description = "The list of stages, newest first", body = Vec<Stage>),
        (status = 500, description = "Server error", body = MessageResponse),
    )
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Stage>>, AppError> {
    let items = a001_stage::service::list_all(&state.db).await?;
    Ok(Json(items))
}

/// GET /api/stages/:id
#[utoipa::path(
    get,
    path = "/api/stages/{id}",
    tag = "Stages",
    params(("id" = String, Path, description = "The stage ID")),
    responses(
        (status = 200, description = "The stage description by id", body = Stage),
        (status = 404, description = "Stage not found", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse),
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stage>, AppError> {
    let stage = a001_stage::service::get_by_id(&state.db, &id).await?;
    Ok(Json(stage))
}

/// PUT /api/stages/:id
#[utoipa::path(
    put,
    path = "/api/stages/{id}",
    tag = "Stages",
    params(("id" = String, Path, description = "The stage ID")),
    request_body = StagePatch,
    responses(
        (status = 200, description = "The stage was updated", body = Stage),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 404, description = "Stage not found", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StagePatch>, JsonRejection>,
) -> Result<Json<Stage>, AppError> {
    let patch = payload(body)?;
    let stage = a001_stage::service::update(&state.db, &id, patch).await?;
    Ok(Json(stage))
}

/// DELETE /api/stages/:id
#[utoipa::path(
    delete,
    path = "/api/stages/{id}",
    tag = "Stages",
    params(("id" = String, Path, description = "The stage ID")),
    responses(
        (status = 200, description = "The stage was deleted", body = MessageResponse),
        (status = 404, description = "Stage not found", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    a001_stage::service::delete(&state.db, &id).await?;
    Ok(Json(MessageResponse::new("Stage deleted successfully")))
}

/// POST /api/stages/seed
#[utoipa::path(
    post,
    path = "/api/stages/seed",
    tag = "Stages",
    request_body = Vec<StageDto>,
    responses(
        (status = 201, description = "All stages successfully imported", body = Vec<Stage>),
        (status = 400, description = "Error importing data, nothing was imported", body = MessageResponse),
        (status = 500, description = "Server error", body = MessageResponse),
    )
)]
pub async fn seed(
    State(state): State<AppState>,
    body: Result<Json<Vec<StageDto>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Stage>>), AppError> {
    let dtos = payload(body)?;
    let stages = a001_stage::service::bulk_insert(&state.db, dtos).await?;
    Ok((StatusCode::CREATED, Json(stages)))
}
