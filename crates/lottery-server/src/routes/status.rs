use axum::{extract::State, Json};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/status: active signup roster and last lottery run
pub async fn get_status(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let status = app.run(|c| c.status()).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "activeSignupSheet": status.active_signup_sheet,
        "lastLotteryRun": status.last_lottery_run,
    })))
}
