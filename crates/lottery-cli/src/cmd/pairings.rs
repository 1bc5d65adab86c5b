use crate::output::{print_json, print_table, timestamp};
use lottery_core::model::PairingGroup;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let view = super::open(root)?.pairings()?;
    if json {
        return print_json(&view);
    }
    if view.pairings.is_empty() {
        println!("no pairings yet");
        return Ok(());
    }
    println!("Lottery run: {}", timestamp(view.lottery_run));
    println!();
    print_groups(&view.pairings);
    Ok(())
}

pub(crate) fn print_groups(groups: &[PairingGroup]) {
    print_table(
        &["GROUP", "NAME", "EMAIL", "SLACK"],
        groups
            .iter()
            .flat_map(|g| {
                g.members.iter().map(move |p| {
                    vec![
                        g.group_id.to_string(),
                        p.name.clone(),
                        p.email.clone(),
                        p.slack.clone(),
                    ]
                })
            })
            .collect(),
    );
}
