use crate::error::{LotteryError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// RosterId
// ---------------------------------------------------------------------------

/// One of the two interchangeable signup rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RosterId {
    #[default]
    A,
    B,
}

impl RosterId {
    pub fn other(self) -> RosterId {
        match self {
            RosterId::A => RosterId::B,
            RosterId::B => RosterId::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RosterId::A => "A",
            RosterId::B => "B",
        }
    }
}

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RosterId {
    type Err = LotteryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "A" | "a" => Ok(RosterId::A),
            "B" | "b" => Ok(RosterId::B),
            _ => Err(LotteryError::InvalidRoster(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub email: String,
    pub slack: String,
    pub signup_date: DateTime<Utc>,
}

impl Participant {
    /// Build a participant from raw signup input, rejecting blank names and
    /// malformed e-mail addresses.
    pub fn new(
        name: &str,
        email: &str,
        slack: &str,
        signup_date: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(LotteryError::InvalidField {
                field: "name",
                reason: "must not be empty".into(),
            });
        }
        if email.is_empty() {
            return Err(LotteryError::InvalidField {
                field: "email",
                reason: "must not be empty".into(),
            });
        }
        if !email_re().is_match(email) {
            return Err(LotteryError::InvalidField {
                field: "email",
                reason: format!("'{email}' is not an e-mail address"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            slack: slack.trim().to_string(),
            signup_date,
        })
    }

    pub fn same_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub fn same_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub id: RosterId,
    #[serde(default)]
    pub members: Vec<Participant>,
}

impl Roster {
    pub fn new(id: RosterId) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append a participant after checking name then e-mail uniqueness.
    pub fn append(&mut self, participant: Participant) -> Result<()> {
        if self.members.iter().any(|m| m.same_name(&participant.name)) {
            return Err(LotteryError::DuplicateName(participant.name));
        }
        if self.members.iter().any(|m| m.same_email(&participant.email)) {
            return Err(LotteryError::DuplicateEmail(participant.email));
        }
        self.members.push(participant);
        Ok(())
    }

    /// Remove every member. Returns how many were removed.
    pub fn purge(&mut self) -> usize {
        let n = self.members.len();
        self.members.clear();
        n
    }
}

// ---------------------------------------------------------------------------
// Pairings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingGroup {
    pub group_id: u32,
    pub members: Vec<Participant>,
}

impl PairingGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingRun {
    pub run_timestamp: DateTime<Utc>,
    pub groups: Vec<PairingGroup>,
}

impl PairingRun {
    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(PairingGroup::len).sum()
    }

    /// Flatten into persisted rows, one per member, tagged with the group id.
    pub fn to_rows(&self) -> Vec<PairingRow> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.members.iter().map(move |m| PairingRow {
                    name: m.name.clone(),
                    email: m.email.clone(),
                    slack: m.slack.clone(),
                    signup_date: Some(m.signup_date),
                    group: Some(g.group_id),
                })
            })
            .collect()
    }
}

/// One persisted member of a pairing run.
///
/// Records written before group ids existed have `group: None`; those fall
/// back to the positional rule where every two consecutive rows form a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRow {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub slack: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
}

/// Rebuild groups from flat rows. Consecutive rows sharing a group id are
/// merged; rows with a blank name are skipped. A missing signup date is
/// filled with `fallback_date`.
pub fn regroup(rows: &[PairingRow], fallback_date: DateTime<Utc>) -> Vec<PairingGroup> {
    let mut groups: Vec<PairingGroup> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if row.name.trim().is_empty() {
            continue;
        }
        let group_id = row.group.unwrap_or((i / 2) as u32 + 1);
        let member = Participant {
            name: row.name.clone(),
            email: row.email.clone(),
            slack: row.slack.clone(),
            signup_date: row.signup_date.unwrap_or(fallback_date),
        };
        match groups.last_mut() {
            Some(last) if last.group_id == group_id => last.members.push(member),
            _ => groups.push(PairingGroup {
                group_id,
                members: vec![member],
            }),
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// RotationState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationState {
    pub active_roster: RosterId,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}
