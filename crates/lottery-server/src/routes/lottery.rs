use axum::{extract::State, Json};

use super::group_json;
use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// POST /api/lottery: pair the active roster and rotate
pub async fn run_lottery(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let result = app.run(|c| c.execute_rotation()).await?;
    let pairings: Vec<serde_json::Value> =
        result.pairing_run.groups.iter().map(group_json).collect();
    Ok(Json(serde_json::json!({
        "success": true,
        "pairings": pairings,
        "previousSheet": result.previous_active,
        "newActiveSheet": result.new_active,
        "emailsSent": result.notification_count,
        "emailsFailed": result.notification_failures,
    })))
}

// ---------------------------------------------------------------------------
// Clear
// ---------------------------------------------------------------------------

/// POST /api/clear: empty both rosters and reset to sheet A
pub async fn clear_all(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    app.run(|c| c.clear_all()).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "All cleared, reset to Sheet A",
    })))
}
