//! Notification contract: one message per member per pairing group.

use crate::model::PairingRun;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub to_email: String,
    pub to_name: String,
    pub partner_names: Vec<String>,
    pub partner_contacts: Vec<String>,
    pub meeting_time: DateTime<Utc>,
}

impl Notification {
    /// "Bo" or "Bo and Cy".
    pub fn partner_text(&self) -> String {
        self.partner_names.join(" and ")
    }

    /// "@bo" or "@bo & @cy".
    pub fn contact_text(&self) -> String {
        self.partner_contacts.join(" & ")
    }
}

/// Outcome of a single send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub success: bool,
    pub detail: String,
}

impl Delivery {
    pub fn sent(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// A channel that can deliver a pairing notification.
///
/// Implementations report failures through [`Delivery`] and never panic;
/// a failed send must not affect the rotation that produced it.
pub trait Notifier: Send + Sync {
    fn send(&self, notification: &Notification) -> Delivery;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub attempted: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Planning and dispatch
// ---------------------------------------------------------------------------

/// Build the notifications for `run`: each member of each group hears about
/// every other member of that group, in group order.
pub fn plan_notifications(run: &PairingRun, meeting_time: DateTime<Utc>) -> Vec<Notification> {
    let mut out = Vec::with_capacity(run.participant_count());
    for group in &run.groups {
        for (i, member) in group.members.iter().enumerate() {
            let partners: Vec<_> = group
                .members
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, p)| p)
                .collect();
            if partners.is_empty() {
                continue;
            }
            out.push(Notification {
                to_email: member.email.clone(),
                to_name: member.name.clone(),
                partner_names: partners.iter().map(|p| p.name.clone()).collect(),
                partner_contacts: partners.iter().map(|p| p.slack.clone()).collect(),
                meeting_time,
            });
        }
    }
    out
}

/// Send every planned notification. Failures are logged and counted.
pub fn dispatch(
    notifier: &dyn Notifier,
    run: &PairingRun,
    meeting_time: DateTime<Utc>,
) -> DispatchReport {
    let mut report = DispatchReport::default();
    for notification in plan_notifications(run, meeting_time) {
        report.attempted += 1;
        let delivery = notifier.send(&notification);
        if delivery.success {
            tracing::debug!(to = %notification.to_email, detail = %delivery.detail, "notification sent");
        } else {
            report.failed += 1;
            tracing::warn!(to = %notification.to_email, detail = %delivery.detail, "notification failed");
        }
    }
    report
}

// ---------------------------------------------------------------------------
// LogNotifier
// ---------------------------------------------------------------------------

/// Logs notifications instead of sending them. Used when no mail API key
/// is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, n: &Notification) -> Delivery {
        tracing::info!(
            to = %n.to_email,
            partners = %n.partner_text(),
            meeting = %n.meeting_time,
            "pairing notification (not sent: no mail transport configured)"
        );
        Delivery::sent("logged")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PairingGroup, Participant};
    use std::sync::Mutex;

    fn member(name: &str) -> Participant {
        Participant::new(
            name,
            &format!("{}@example.com", name.to_lowercase()),
            &format!("@{}", name.to_lowercase()),
            Utc::now(),
        )
        .unwrap()
    }

    fn run(groups: Vec<Vec<&str>>) -> PairingRun {
        PairingRun {
            run_timestamp: Utc::now(),
            groups: groups
                .into_iter()
                .enumerate()
                .map(|(i, names)| PairingGroup {
                    group_id: i as u32 + 1,
                    members: names.into_iter().map(member).collect(),
                })
                .collect(),
        }
    }

    struct FailFor(&'static str, Mutex<Vec<String>>);

    impl Notifier for FailFor {
        fn send(&self, n: &Notification) -> Delivery {
            self.1.lock().unwrap().push(n.to_email.clone());
            if n.to_email == self.0 {
                Delivery::failed("mailbox full")
            } else {
                Delivery::sent("ok")
            }
        }
    }

    #[test]
    fn pair_members_name_each_other() {
        let plan = plan_notifications(&run(vec![vec!["Ana", "Bo"]]), Utc::now());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].to_name, "Ana");
        assert_eq!(plan[0].partner_names, vec!["Bo"]);
        assert_eq!(plan[0].partner_contacts, vec!["@bo"]);
        assert_eq!(plan[1].to_name, "Bo");
        assert_eq!(plan[1].partner_names, vec!["Ana"]);
    }

    #[test]
    fn triple_members_name_both_others() {
        let plan = plan_notifications(&run(vec![vec!["Ana", "Bo", "Cy"]]), Utc::now());
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[1].to_name, "Bo");
        assert_eq!(plan[1].partner_text(), "Ana and Cy");
        assert_eq!(plan[1].contact_text(), "@ana & @cy");
    }

    #[test]
    fn singleton_group_gets_no_notification() {
        let plan = plan_notifications(&run(vec![vec!["Ana"]]), Utc::now());
        assert!(plan.is_empty());
    }

    #[test]
    fn dispatch_counts_attempts_and_failures() {
        let notifier = FailFor("bo@example.com", Mutex::new(Vec::new()));
        let report = dispatch(
            &notifier,
            &run(vec![vec!["Ana", "Bo"], vec!["Cy", "Di", "Ed"]]),
            Utc::now(),
        );
        assert_eq!(report.attempted, 5);
        assert_eq!(report.failed, 1);
        assert_eq!(notifier.1.lock().unwrap().len(), 5, "a failure does not stop dispatch");
    }

    #[test]
    fn log_notifier_always_succeeds() {
        let plan = plan_notifications(&run(vec![vec!["Ana", "Bo"]]), Utc::now());
        assert!(LogNotifier.send(&plan[0]).success);
    }
}
