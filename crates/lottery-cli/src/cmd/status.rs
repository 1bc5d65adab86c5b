use crate::output::{print_json, timestamp};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let controller = super::open(root)?;
    let status = controller.status()?;
    if json {
        return print_json(&status);
    }
    let waiting = controller.participants(None)?.participants.len();
    let meeting = &controller.config().meeting;
    println!("Active sheet:    {}", status.active_signup_sheet);
    println!("Signed up:       {waiting}");
    println!("Last lottery:    {}", timestamp(status.last_lottery_run));
    println!(
        "Meeting:         {} {:02}:00 UTC, {} min",
        meeting.weekday, meeting.hour, meeting.duration_minutes
    );
    Ok(())
}
