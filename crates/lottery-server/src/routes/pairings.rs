use axum::{extract::State, Json};

use super::group_json;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/pairings: groups from the last lottery run
pub async fn get_pairings(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let view = app.run(|c| c.pairings()).await?;
    let pairings: Vec<serde_json::Value> = view.pairings.iter().map(group_json).collect();
    Ok(Json(serde_json::json!({
        "success": true,
        "pairings": pairings,
        "lotteryRun": view.lottery_run,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_before_first_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::open(dir.path()).unwrap();
        let result = get_pairings(State(app)).await.unwrap();
        assert_eq!(result.0["success"], true);
        assert!(result.0["pairings"].as_array().unwrap().is_empty());
        assert!(result.0["lotteryRun"].is_null());
    }

    #[tokio::test]
    async fn groups_are_member_arrays() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::open(dir.path()).unwrap();
        app.run(|c| {
            c.add_participant("Ana", "ana@x.com", "@ana")?;
            c.add_participant("Bo", "bo@x.com", "@bo")?;
            c.execute_rotation()
        })
        .await
        .unwrap();

        let result = get_pairings(State(app)).await.unwrap();
        let groups = result.0["pairings"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        let members = groups[0].as_array().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0]["pairGroup"], 1);
        assert!(result.0["lotteryRun"].is_string());
    }
}
