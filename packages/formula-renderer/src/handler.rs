use axum::extract::{Path, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::host::HostError;
use crate::render::{RenderError, RenderedImage, render_formula};
use formula_core::{MediaError, TransformError, UserId, validate_query};

const CACHE_CONTROL_NO_STORE: &str = "no-store";
const X_IMAGE_WIDTH: HeaderName = HeaderName::from_static("x-image-width");
const X_IMAGE_HEIGHT: HeaderName = HeaderName::from_static("x-image-height");

const RENDER_FAILED_MESSAGE: &str = "could not render formula";
const EMPTY_CONTENT_MESSAGE: &str = "nothing to show";
const NO_HISTORY_MESSAGE: &str = "no recent query stored";

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub user_id: UserId,
    pub formula: String,
}

#[derive(Debug, Serialize)]
pub struct InlineResponse {
    pub photo_url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user_id: UserId,
    pub query: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/render", post(render))
        .route("/inline", post(inline))
        .route("/history/{user_id}", get(history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// 数式を描画し、画像を直接返す
pub async fn render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let rendered = render_and_record(&state, request).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CACHE_CONTROL, CACHE_CONTROL_NO_STORE.to_string()),
            (X_IMAGE_WIDTH, rendered.width.to_string()),
            (X_IMAGE_HEIGHT, rendered.height.to_string()),
        ],
        rendered.bytes,
    )
        .into_response())
}

/// 数式を描画して画像ホストにアップロードし、URL と寸法を返す
pub async fn inline(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<InlineResponse>, AppError> {
    let Some(host) = state.image_host.clone() else {
        return Err(AppError::HostUnavailable("image host is not configured".to_string()));
    };

    validate_query(&request.formula)?;
    let rendered = render_formula(state.compiler.as_ref(), &request.formula, &state.settings).await?;

    tracing::info!(user_id = %request.user_id, bytes = rendered.bytes.len(), "uploading image");
    let hosted = host.upload(&rendered.bytes).await?;

    // 回答の準備ができてから履歴に残す
    state.history.record(request.user_id, request.formula);

    Ok(Json(InlineResponse {
        photo_url: hosted.photo_url,
        thumbnail_url: hosted.thumbnail_url,
        width: rendered.width,
        height: rendered.height,
    }))
}

/// ユーザーの直近のクエリを返す
pub async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<HistoryResponse>, AppError> {
    match state.history.last_query(user_id) {
        Some(query) => Ok(Json(HistoryResponse { user_id, query })),
        None => {
            tracing::debug!(user_id = %user_id, "no history stored");
            Err(AppError::NotFound(NO_HISTORY_MESSAGE.to_string()))
        }
    }
}

async fn render_and_record(
    state: &AppState,
    request: RenderRequest,
) -> Result<RenderedImage, AppError> {
    validate_query(&request.formula)?;

    tracing::info!(user_id = %request.user_id, len = request.formula.len(), "rendering formula");
    let rendered = render_formula(state.compiler.as_ref(), &request.formula, &state.settings).await?;
    tracing::info!(
        user_id = %request.user_id,
        width = rendered.width,
        height = rendered.height,
        "rendered formula"
    );

    state.history.record(request.user_id, request.formula);
    Ok(rendered)
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    RenderFailed { suggestion: Option<String> },
    EmptyContent,
    Timeout,
    HostUnavailable(String),
    UploadFailed,
    Internal(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Validation(msg) => {
                tracing::warn!(error = %msg, "validation error");
                AppError::BadRequest(msg)
            }
            MediaError::Transform(transform_err) => transform_err.into(),
        }
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::EmptyContent => {
                tracing::info!("rendered page has no content");
                AppError::EmptyContent
            }
            TransformError::DegenerateGeometry { width, height } => {
                tracing::warn!(width = %width, height = %height, "degenerate image geometry");
                AppError::RenderFailed { suggestion: None }
            }
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::RenderFailed { suggestion: None }
            }
            TransformError::InvalidParams(msg) => {
                tracing::error!(error = %msg, "invalid normalizer parameters");
                AppError::Internal(msg)
            }
            TransformError::ProcessingFailed(msg) => {
                tracing::error!(error = %msg, "image processing failed");
                AppError::RenderFailed { suggestion: None }
            }
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Compile(compile_err) => {
                tracing::warn!(error = %compile_err, "formula compilation failed");
                AppError::RenderFailed {
                    suggestion: compile_err.suggestion(),
                }
            }
            RenderError::Transform(transform_err) => transform_err.into(),
            RenderError::Timeout(limit) => {
                tracing::warn!(limit = ?limit, "rendering timed out");
                AppError::Timeout
            }
            RenderError::Task(msg) => AppError::Internal(msg),
        }
    }
}

impl From<HostError> for AppError {
    fn from(err: HostError) -> Self {
        tracing::error!(error = %err, "image upload failed");
        AppError::UploadFailed
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            AppError::RenderFailed { suggestion } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "error": RENDER_FAILED_MESSAGE, "suggestion": suggestion }),
            ),
            AppError::EmptyContent => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "error": EMPTY_CONTENT_MESSAGE }),
            ),
            AppError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                serde_json::json!({ "error": RENDER_FAILED_MESSAGE }),
            ),
            AppError::HostUnavailable(msg) => {
                tracing::error!(error = %msg, "image host unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    serde_json::json!({ "error": "image host unavailable" }),
                )
            }
            AppError::UploadFailed => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": "image upload failed" }),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
