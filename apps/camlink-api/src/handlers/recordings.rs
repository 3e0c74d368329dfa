//! 云端录像 handlers
//!
//! - GET /api/cameras/:device_id/recordings/dates
//! - GET /api/cameras/:device_id/recordings?startTime=&endTime=

use crate::AppState;
use crate::utils::response::cloud_error;
use crate::utils::{parse_time_window, validate_device_id};
use api_contract::{RecordingDatesResponse, RecordingEventsResponse, RecordingQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

pub async fn list_recording_dates(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Response {
    let device_id = match validate_device_id(&device_id) {
        Ok(device_id) => device_id,
        Err(response) => return response,
    };
    match state.recordings.dates(device_id).await {
        Ok(dates) => Json(RecordingDatesResponse { dates }).into_response(),
        Err(err) => cloud_error("Failed to get recording dates", err),
    }
}

pub async fn list_recordings(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(query): Query<RecordingQuery>,
) -> Response {
    let device_id = match validate_device_id(&device_id) {
        Ok(device_id) => device_id,
        Err(response) => return response,
    };
    let (start_time, end_time) =
        match parse_time_window(query.start_time.as_deref(), query.end_time.as_deref()) {
            Ok(window) => window,
            Err(response) => return response,
        };
    match state.recordings.events(device_id, start_time, end_time).await {
        Ok(events) => Json(RecordingEventsResponse { events }).into_response(),
        Err(err) => cloud_error("Failed to get recordings", err),
    }
}
