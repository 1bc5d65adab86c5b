//! iCalendar (RFC 5545) invite for a lunch pairing.

use chrono::{DateTime, Duration, Utc};

pub const INVITE_FILENAME: &str = "lunch-invite.ics";

/// Everything that goes into one invite.
#[derive(Debug, Clone)]
pub struct Invite<'a> {
    pub to_name: &'a str,
    pub partner_text: &'a str,
    pub start: DateTime<Utc>,
    pub duration: Duration,
    pub uid: String,
    pub stamp: DateTime<Utc>,
}

impl<'a> Invite<'a> {
    /// Invite with a fresh `lunch-<uuid>@<domain>` UID stamped now.
    pub fn new(
        to_name: &'a str,
        partner_text: &'a str,
        start: DateTime<Utc>,
        duration: Duration,
        domain: &str,
    ) -> Self {
        Self {
            to_name,
            partner_text,
            start,
            duration,
            uid: format!("lunch-{}@{domain}", uuid::Uuid::new_v4().simple()),
            stamp: Utc::now(),
        }
    }

    pub fn render(&self) -> String {
        let end = self.start + self.duration;
        [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//Lunch Lottery//lunchlottery.org//EN".to_string(),
            "METHOD:REQUEST".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{}", ics_date(self.stamp)),
            format!("DTSTART:{}", ics_date(self.start)),
            format!("DTEND:{}", ics_date(end)),
            format!(
                "SUMMARY:Lunch: {} & {}",
                escape_text(self.to_name),
                escape_text(self.partner_text)
            ),
            "DESCRIPTION:Lunch Lottery pairing! Reach out on Slack to decide where to meet."
                .to_string(),
            "STATUS:CONFIRMED".to_string(),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ]
        .join("\r\n")
    }
}

fn ics_date(t: DateTime<Utc>) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape TEXT values: backslash, semicolon, comma and newlines.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
