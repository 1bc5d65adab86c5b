use axum::{
    extract::{Query, State},
    Json,
};
use lottery_core::model::RosterId;
use serde::Deserialize;

use super::participant_json;
use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SheetQuery {
    /// `A` or `B`; the active roster when absent.
    pub sheet: Option<String>,
}

/// GET /api/participants?sheet=A|B: signups on a roster, the active one by default
pub async fn list_participants(
    State(app): State<AppState>,
    Query(q): Query<SheetQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sheet = q.sheet.as_deref().map(str::parse::<RosterId>).transpose()?;
    let view = app.run(move |c| c.participants(sheet)).await?;
    let participants: Vec<serde_json::Value> =
        view.participants.iter().map(participant_json).collect();
    Ok(Json(serde_json::json!({
        "success": true,
        "participants": participants,
        "sheet": view.sheet,
        "activeSheet": view.active_sheet,
    })))
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct AddBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub slack: String,
}

/// POST /api/participants: sign up on the active roster
pub async fn add_participant(
    State(app): State<AppState>,
    Json(body): Json<AddBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let signup = app
        .run(move |c| c.add_participant(&body.name, &body.email, &body.slack))
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Participant added to Sheet {}", signup.roster),
    })))
}
