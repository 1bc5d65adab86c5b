//! Roster store: the complete persisted state of the lottery.
//!
//! Layout:
//!   .lottery/ledger.yaml   rotation state, both rosters, last pairing run
//!   .lottery/ledger.lock   advisory lock held by writers from load to commit
//!
//! The whole ledger is committed in one atomic write, so a rotation either
//! lands completely or not at all.

use crate::error::Result;
use crate::io;
use crate::model::{regroup, PairingGroup, PairingRow, PairingRun, Roster, RosterId, RotationState};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The last pairing run in its persisted, flat form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPairings {
    pub lottery_run: DateTime<Utc>,
    #[serde(default)]
    pub rows: Vec<PairingRow>,
}

impl PersistedPairings {
    pub fn from_run(run: &PairingRun) -> Self {
        Self {
            lottery_run: run.run_timestamp,
            rows: run.to_rows(),
        }
    }

    pub fn groups(&self) -> Vec<PairingGroup> {
        regroup(&self.rows, self.lottery_run)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub rotation: RotationState,
    #[serde(default = "empty_a")]
    pub roster_a: Roster,
    #[serde(default = "empty_b")]
    pub roster_b: Roster,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairings: Option<PersistedPairings>,
}

fn empty_a() -> Roster {
    Roster::new(RosterId::A)
}

fn empty_b() -> Roster {
    Roster::new(RosterId::B)
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            rotation: RotationState::default(),
            roster_a: empty_a(),
            roster_b: empty_b(),
            pairings: None,
        }
    }
}

impl Ledger {
    pub fn roster(&self, id: RosterId) -> &Roster {
        match id {
            RosterId::A => &self.roster_a,
            RosterId::B => &self.roster_b,
        }
    }

    pub fn roster_mut(&mut self, id: RosterId) -> &mut Roster {
        match id {
            RosterId::A => &mut self.roster_a,
            RosterId::B => &mut self.roster_b,
        }
    }

    pub fn active_roster(&self) -> &Roster {
        self.roster(self.rotation.active_roster)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Durable home of the [`Ledger`].
///
/// Writers go through [`Store::begin`]: the transaction it returns holds the
/// store's exclusive lock from load to commit, so writers in other threads or
/// other processes cannot interleave a stale commit. Dropping a transaction
/// without committing writes nothing.
pub trait Store: Send + Sync {
    /// The last committed ledger. Takes no lock.
    fn load(&self) -> Result<Ledger>;

    /// Lock the store and load the ledger for modification.
    fn begin(&self) -> Result<Box<dyn Transaction + '_>>;
}

/// A locked, loaded ledger waiting to be committed.
pub trait Transaction {
    fn ledger(&mut self) -> &mut Ledger;

    /// Persist the ledger all-or-nothing, then release the lock.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// YAML file store under `<root>/.lottery/ledger.yaml`, guarded by an
/// advisory lock on `<root>/.lottery/ledger.lock`.
#[derive(Debug, Clone)]
pub struct YamlStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl YamlStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: paths::ledger_path(root),
            lock_path: paths::lock_path(root),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for YamlStore {
    /// A missing or blank file is an empty ledger, not an error.
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Ledger::default());
        }
        let mut ledger: Ledger = serde_yaml::from_str(&content)?;
        // Hand-edited files may carry swapped tags; the slot decides.
        ledger.roster_a.id = RosterId::A;
        ledger.roster_b.id = RosterId::B;
        Ok(ledger)
    }

    fn begin(&self) -> Result<Box<dyn Transaction + '_>> {
        let lock = io::lock_exclusive(&self.lock_path)?;
        let ledger = self.load()?;
        Ok(Box::new(YamlTransaction {
            path: &self.path,
            ledger,
            _lock: lock,
        }))
    }
}

struct YamlTransaction<'a> {
    path: &'a Path,
    ledger: Ledger,
    _lock: File,
}

impl Transaction for YamlTransaction<'_> {
    fn ledger(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let content = serde_yaml::to_string(&self.ledger)?;
        io::atomic_write(self.path, content.as_bytes())
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Ledger> {
        Ok(self.lock().clone())
    }

    fn begin(&self) -> Result<Box<dyn Transaction + '_>> {
        let guard = self.lock();
        let ledger = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, ledger }))
    }
}

struct MemoryTransaction<'a> {
    guard: MutexGuard<'a, Ledger>,
    ledger: Ledger,
}

impl Transaction for MemoryTransaction<'_> {
    fn ledger(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction { mut guard, ledger } = *self;
        *guard = ledger;
        Ok(())
    }
}
