use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/settings
///
/// Local proxy over the settings store, shaped like the backend endpoint.
pub async fn handle_get_settings(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let snapshot = state.site_settings().await;
    match snapshot.settings {
        Some(settings) => Ok(Json(json!({ "success": true, "data": settings }))),
        None => Err(AppError::Upstream(
            snapshot
                .error
                .unwrap_or_else(|| "Failed to fetch website settings".to_string()),
        )),
    }
}
