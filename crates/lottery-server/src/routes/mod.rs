pub mod actions;
pub mod lottery;
pub mod pairings;
pub mod participants;
pub mod status;

use lottery_core::model::{PairingGroup, Participant};

// ---------------------------------------------------------------------------
// Payload shaping shared by the REST and action routes
// ---------------------------------------------------------------------------

pub(crate) fn participant_json(p: &Participant) -> serde_json::Value {
    serde_json::json!({
        "name": p.name,
        "email": p.email,
        "slack": p.slack,
        "signupDate": p.signup_date,
    })
}

/// A group as a plain array of members, each tagged with its group id.
pub(crate) fn group_json(g: &PairingGroup) -> serde_json::Value {
    let members: Vec<serde_json::Value> = g
        .members
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name,
                "email": m.email,
                "slack": m.slack,
                "pairGroup": g.group_id,
            })
        })
        .collect();
    serde_json::Value::Array(members)
}
