use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let result = super::open(root)?.execute_rotation()?;
    if json {
        return print_json(&result);
    }

    println!(
        "Paired {} people into {} groups.",
        result.pairing_run.participant_count(),
        result.pairing_run.groups.len()
    );
    println!();
    super::pairings::print_groups(&result.pairing_run.groups);
    println!();
    println!(
        "Notifications: {} sent, {} failed",
        result.notification_count - result.notification_failures,
        result.notification_failures
    );
    println!(
        "Sheet {} closed; signups now go to sheet {}.",
        result.previous_active, result.new_active
    );
    Ok(())
}
