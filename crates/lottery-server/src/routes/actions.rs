//! Single-endpoint action dispatch: `GET /api?action=…` and `POST /api`
//! with `{"action": …}`. Forwards to the same handlers as the REST routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::{lottery, pairings, participants, status};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
    /// Roster for `getParticipants`.
    pub sheet: Option<String>,
}

/// GET /api: read actions; defaults to `getParticipants`
pub async fn get_action(
    State(app): State<AppState>,
    Query(q): Query<ActionQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    match q.action.as_deref().unwrap_or("getParticipants") {
        "getParticipants" => {
            let sheet = participants::SheetQuery { sheet: q.sheet };
            participants::list_participants(State(app), Query(sheet)).await
        }
        "getPairings" => pairings::get_pairings(State(app)).await,
        "getStatus" => status::get_status(State(app)).await,
        _ => Err(AppError::bad_request("Unknown action")),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ActionBody {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub slack: String,
}

/// POST /api: write actions
pub async fn post_action(
    State(app): State<AppState>,
    Json(body): Json<ActionBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    match body.action.as_str() {
        "addParticipant" => {
            let add = participants::AddBody {
                name: body.name,
                email: body.email,
                slack: body.slack,
            };
            participants::add_participant(State(app), Json(add)).await
        }
        "runLottery" => lottery::run_lottery(State(app)).await,
        "clearAll" => lottery::clear_all(State(app)).await,
        _ => Err(AppError::bad_request("Unknown action")),
    }
}
