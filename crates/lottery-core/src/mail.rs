//! Pairing e-mails sent through the Resend HTTP API, each with a calendar
//! invite attached.

use crate::calendar::{Invite, INVITE_FILENAME};
use crate::config::{Config, MailConfig};
use crate::notify::{Delivery, Notification, Notifier};
use base64::Engine as _;
use chrono::Duration;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Attachment {
    filename: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    html: String,
    attachments: Vec<Attachment>,
}

pub fn subject(n: &Notification) -> String {
    format!(
        "Lunch Lottery - You're paired up! {} & {}",
        n.to_name,
        n.partner_text()
    )
}

pub fn html_body(n: &Notification) -> String {
    let date = n.meeting_time.format("%A %-d %B %Y");
    format!(
        "<p>Hi {to} - It's Lunch Lottery day! You're lunching with {partners} on {date}. \
         Reach out to them now: {contacts}.</p>\n<p>Enjoy,<br>Your Lunch Lottery bot</p>",
        to = escape_html(&n.to_name),
        partners = escape_html(&n.partner_text()),
        contacts = escape_html(&n.contact_text()),
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// ResendMailer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ResendMailer {
    mail: MailConfig,
    api_key: String,
    meeting_duration: Duration,
}

impl ResendMailer {
    pub fn new(mail: MailConfig, api_key: impl Into<String>, meeting_duration: Duration) -> Self {
        Self {
            mail,
            api_key: api_key.into(),
            meeting_duration,
        }
    }

    /// Build a mailer from config, or `None` when the API key variable is unset.
    pub fn from_config(config: &Config) -> Option<Self> {
        let key = config.mail.api_key()?;
        Some(Self::new(
            config.mail.clone(),
            key,
            Duration::minutes(i64::from(config.meeting.duration_minutes)),
        ))
    }

    fn payload<'a>(&'a self, n: &'a Notification) -> EmailPayload<'a> {
        let partners = n.partner_text();
        let invite = Invite::new(
            &n.to_name,
            &partners,
            n.meeting_time,
            self.meeting_duration,
            &self.mail.domain,
        );
        EmailPayload {
            from: &self.mail.from,
            to: &n.to_email,
            subject: subject(n),
            html: html_body(n),
            attachments: vec![Attachment {
                filename: INVITE_FILENAME,
                content: base64::engine::general_purpose::STANDARD.encode(invite.render()),
            }],
        }
    }
}

impl Notifier for ResendMailer {
    fn send(&self, n: &Notification) -> Delivery {
        // Blocking client: callers on an async runtime must hop to a blocking
        // thread first. Built per send so it is never dropped on a worker.
        let client = match reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(self.mail.timeout_secs))
            .build()
        {
            Ok(c) => c,
            Err(e) => return Delivery::failed(format!("http client: {e}")),
        };

        let url = format!("{}/emails", self.mail.api_base.trim_end_matches('/'));
        let response = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(n))
            .send();

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().unwrap_or_default();
                if status.is_success() {
                    Delivery::sent(body)
                } else {
                    Delivery::failed(format!("HTTP {status}: {body}"))
                }
            }
            Err(e) => Delivery::failed(e.to_string()),
        }
    }
}
