//! Endpoint handlers.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use gaze_keys_core::{GazeError, GazePoint};
use tracing::{debug, info};

use super::error::ApiError;
use super::types::{
    CalibrationRequest, HealthResponse, KeyResponse, MessageResponse, CALIBRATION_COMPLETED,
    IMAGE_FIELD, MODEL_UPDATED, TRACKER_INITIALIZED,
};
use super::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        model_loaded: state.predictor.is_available(),
    })
}

pub async fn initialize() -> Json<MessageResponse> {
    info!("Initializing tracker");
    Json(MessageResponse::new(TRACKER_INITIALIZED))
}

/// Predicts the gaze point for an uploaded frame.
///
/// A missing model is reported before the upload is read, so a broken
/// server answers 500 even for garbage uploads.
pub async fn capture_gaze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GazePoint>, ApiError> {
    info!("Capturing gaze");
    if !state.predictor.is_available() {
        return Err(GazeError::ModelUnavailable.into());
    }

    let bytes = read_image_field(multipart?).await?;
    debug!("Received {} byte frame", bytes.len());

    let predictor = state.predictor.clone();
    let point = tokio::task::spawn_blocking(move || predictor.capture(&bytes)).await??;
    debug!("Predicted gaze point ({}, {})", point.x, point.y);

    Ok(Json(point))
}

async fn read_image_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::validation(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("missing multipart field '{IMAGE_FIELD}'"),
    ))
}

pub async fn translate_gaze(
    State(state): State<AppState>,
    payload: Result<Json<GazePoint>, JsonRejection>,
) -> Result<Json<KeyResponse>, ApiError> {
    let Json(point) = payload?;
    info!("Translating gaze: x={} y={}", point.x, point.y);

    let key = state.layout.key_at(point)?;
    Ok(Json(KeyResponse { key: key.into() }))
}

/// Accepts calibration pairs. The model is not adjusted.
pub async fn calibrate(
    payload: Result<Json<CalibrationRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    info!("Calibrating model");

    let samples = request.samples();
    debug!(
        "Received {} gaze points and {} screen points ({} pairs)",
        request.gaze_data.len(),
        request.screen_points.len(),
        samples.len()
    );

    Ok(Json(MessageResponse::new(CALIBRATION_COMPLETED)))
}

/// Accepts new gaze data. The model is not retrained.
pub async fn update_model(
    payload: Result<Json<Vec<GazePoint>>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(points) = payload?;
    info!("Updating model");
    debug!("Received {} gaze points", points.len());

    Ok(Json(MessageResponse::new(MODEL_UPDATED)))
}
