//! HTTP endpoints for saving and restoring a room's drawing

use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::core::server::SharedServerManager;
use crate::error::RustyCanvasError;

/// `POST /rooms/{id}/save`
pub async fn save_room(
    room_id: String,
    server: SharedServerManager,
) -> Result<WithStatus<Json>, Infallible> {
    let result = match decode_room_id(&room_id) {
        Ok(id) => server.save_room(&id).await,
        Err(e) => Err(e),
    };
    let reply = match result {
        Ok(location) => warp::reply::with_status(
            warp::reply::json(&json!({ "ok": true, "file": location })),
            StatusCode::OK,
        ),
        Err(e) => error_reply(&e),
    };
    Ok(reply)
}

/// `POST /rooms/{id}/load`
pub async fn load_room(
    room_id: String,
    server: SharedServerManager,
) -> Result<WithStatus<Json>, Infallible> {
    let result = match decode_room_id(&room_id) {
        Ok(id) => server.load_room(&id).await,
        Err(e) => Err(e),
    };
    let reply = match result {
        Ok(loaded) => warp::reply::with_status(
            warp::reply::json(&json!({ "ok": true, "loaded": loaded })),
            StatusCode::OK,
        ),
        Err(e) => error_reply(&e),
    };
    Ok(reply)
}

// Path segments arrive percent-encoded
fn decode_room_id(raw: &str) -> Result<String, RustyCanvasError> {
    urlencoding::decode(raw)
        .map(|id| id.into_owned())
        .map_err(|e| RustyCanvasError::ValidationError(format!("Invalid room id: {}", e)))
}

fn error_reply(err: &RustyCanvasError) -> WithStatus<Json> {
    let (status, message) = match err {
        RustyCanvasError::SnapshotNotFound(_) => {
            (StatusCode::NOT_FOUND, "no saved session".to_string())
        }
        RustyCanvasError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    };
    warp::reply::with_status(
        warp::reply::json(&json!({ "ok": false, "error": message })),
        status,
    )
}
