//! Rotation controller: signups, lottery runs and roster rotation.
//!
//! Two rosters, A and B, take turns collecting signups. A lottery run pairs
//! the active roster, then makes the other roster active and empties it. The
//! roster that was just paired stays populated until it becomes active again
//! one cycle later, so the last run's names remain visible in the meantime.
//!
//! Every read-modify-write runs inside one [`Store::begin`] transaction,
//! which holds the store's exclusive lock until its single commit.
//! Notifications go out only after that commit.

use crate::config::Config;
use crate::error::Result;
use crate::lottery;
use crate::mail::ResendMailer;
use crate::meeting;
use crate::model::{PairingGroup, PairingRun, Participant, RosterId};
use crate::notify::{self, DispatchReport, LogNotifier, Notifier};
use crate::store::{Ledger, PersistedPairings, Store, YamlStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationResult {
    pub pairing_run: PairingRun,
    pub previous_active: RosterId,
    pub new_active: RosterId,
    pub notification_count: usize,
    pub notification_failures: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub participant: Participant,
    pub roster: RosterId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub active_signup_sheet: RosterId,
    pub last_lottery_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingsView {
    pub pairings: Vec<PairingGroup>,
    pub lottery_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsView {
    pub participants: Vec<Participant>,
    /// The roster listed.
    pub sheet: RosterId,
    pub active_sheet: RosterId,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct Controller {
    store: Box<dyn Store>,
    notifier: Box<dyn Notifier>,
    config: Config,
}

impl Controller {
    pub fn new(store: Box<dyn Store>, notifier: Box<dyn Notifier>, config: Config) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Controller over `<root>/.lottery`, mailing through Resend when an API
    /// key is configured and logging notifications otherwise.
    pub fn open(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        let notifier: Box<dyn Notifier> = match ResendMailer::from_config(&config) {
            Some(mailer) => Box::new(mailer),
            None => {
                tracing::info!(
                    env = %config.mail.api_key_env,
                    "mail API key not set; pairing notifications will only be logged"
                );
                Box::new(LogNotifier)
            }
        };
        Ok(Self::new(Box::new(YamlStore::new(root)), notifier, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sign a participant up on the active roster.
    pub fn add_participant(&self, name: &str, email: &str, slack: &str) -> Result<Signup> {
        let participant = Participant::new(name, email, slack, Utc::now())?;

        let mut tx = self.store.begin()?;
        let ledger = tx.ledger();
        let active = ledger.rotation.active_roster;
        ledger.roster_mut(active).append(participant.clone())?;
        tx.commit()?;

        tracing::info!(roster = %active, name = %participant.name, "participant signed up");
        Ok(Signup {
            participant,
            roster: active,
        })
    }

    /// Pair the active roster and rotate to the other one.
    ///
    /// Fails without touching state when the active roster has fewer than
    /// two members. Pairings, the roster flip, the last-run stamp and the
    /// purge of the newly active roster are committed together.
    pub fn execute_rotation(&self) -> Result<RotationResult> {
        let (run, previous_active, new_active) = {
            let mut tx = self.store.begin()?;
            let ledger = tx.ledger();
            let previous_active = ledger.rotation.active_roster;

            let run = lottery::run_lottery(ledger.active_roster().members())?;

            ledger.pairings = Some(PersistedPairings::from_run(&run));
            let new_active = previous_active.other();
            ledger.rotation.active_roster = new_active;
            ledger.rotation.last_run = Some(run.run_timestamp);
            let purged = ledger.roster_mut(new_active).purge();

            tx.commit()?;
            tracing::info!(
                paired = run.participant_count(),
                groups = run.groups.len(),
                previous = %previous_active,
                active = %new_active,
                purged,
                "lottery run committed"
            );
            (run, previous_active, new_active)
        };

        let meeting_time = meeting::next_meeting(
            run.run_timestamp,
            self.config.meeting.weekday,
            self.config.meeting.hour,
        );
        let DispatchReport { attempted, failed } =
            notify::dispatch(self.notifier.as_ref(), &run, meeting_time);
        if failed > 0 {
            tracing::warn!(failed, attempted, "some pairing notifications failed");
        }

        Ok(RotationResult {
            pairing_run: run,
            previous_active,
            new_active,
            notification_count: attempted,
            notification_failures: failed,
        })
    }

    /// Empty both rosters, drop the pairings and reset to roster A.
    pub fn clear_all(&self) -> Result<()> {
        let mut tx = self.store.begin()?;
        *tx.ledger() = Ledger::default();
        tx.commit()?;
        tracing::info!("all rosters and pairings cleared");
        Ok(())
    }

    pub fn status(&self) -> Result<StatusView> {
        let ledger = self.store.load()?;
        Ok(StatusView {
            active_signup_sheet: ledger.rotation.active_roster,
            last_lottery_run: ledger.rotation.last_run,
        })
    }

    pub fn pairings(&self) -> Result<PairingsView> {
        let ledger = self.store.load()?;
        Ok(match ledger.pairings {
            Some(p) => PairingsView {
                pairings: p.groups(),
                lottery_run: Some(p.lottery_run),
            },
            None => PairingsView {
                pairings: Vec::new(),
                lottery_run: None,
            },
        })
    }

    /// Signups on `sheet`, or on the active roster when `None`. The dormant
    /// roster still holds the people paired by the last run.
    pub fn participants(&self, sheet: Option<RosterId>) -> Result<ParticipantsView> {
        let ledger = self.store.load()?;
        let active_sheet = ledger.rotation.active_roster;
        let sheet = sheet.unwrap_or(active_sheet);
        Ok(ParticipantsView {
            participants: ledger.roster(sheet).members().to_vec(),
            sheet,
            active_sheet,
        })
    }
}
