use crate::error::{LotteryError, Result};
use crate::io;
use crate::paths;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// MailConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Domain used in calendar invite UIDs.
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_from() -> String {
    "lottery@lunchlottery.org".to_string()
}

fn default_api_base() -> String {
    "https://api.resend.com".to_string()
}

fn default_api_key_env() -> String {
    "RESEND_API_KEY".to_string()
}

fn default_domain() -> String {
    "lunchlottery.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: default_from(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            domain: default_domain(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MailConfig {
    /// The API key, if the configured environment variable is set and non-blank.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// MeetingConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingConfig {
    #[serde(default = "default_weekday")]
    pub weekday: Weekday,
    /// Hour of day (UTC, 0-23) the meeting starts.
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

fn default_weekday() -> Weekday {
    Weekday::Tue
}

fn default_hour() -> u32 {
    12
}

fn default_duration() -> u32 {
    60
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            hour: default_hour(),
            duration_minutes: default_duration(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub meeting: MeetingConfig,
}

impl Config {
    /// Load `.lottery/config.yaml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Result<()> {
        if self.meeting.hour > 23 {
            return Err(LotteryError::InvalidField {
                field: "meeting.hour",
                reason: format!("{} is not an hour of the day", self.meeting.hour),
            });
        }
        if self.meeting.duration_minutes == 0 {
            return Err(LotteryError::InvalidField {
                field: "meeting.duration_minutes",
                reason: "must be positive".into(),
            });
        }
        if self.mail.from.trim().is_empty() {
            return Err(LotteryError::InvalidField {
                field: "mail.from",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
