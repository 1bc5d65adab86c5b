use crate::output::{print_json, print_table};
use clap::Subcommand;
use lottery_core::model::RosterId;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand tree
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ParticipantsSubcommand {
    /// List signups on a sheet
    List {
        /// Sheet to list (A or B); defaults to the active sheet
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Sign someone up on the active sheet
    Add {
        /// Display name (unique per sheet, case-insensitive)
        #[arg(long)]
        name: String,

        /// E-mail address (unique per sheet, case-insensitive)
        #[arg(long)]
        email: String,

        /// Slack handle
        #[arg(long, default_value = "")]
        slack: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcommand: ParticipantsSubcommand, json: bool) -> anyhow::Result<()> {
    let controller = super::open(root)?;
    match subcommand {
        ParticipantsSubcommand::List { sheet } => {
            let sheet = sheet.as_deref().map(str::parse::<RosterId>).transpose()?;
            let view = controller.participants(sheet)?;
            if json {
                return print_json(&view);
            }
            if view.participants.is_empty() {
                println!("no signups on sheet {}", view.sheet);
                return Ok(());
            }
            print_table(
                &["NAME", "EMAIL", "SLACK", "SIGNED UP"],
                view.participants
                    .iter()
                    .map(|p| {
                        vec![
                            p.name.clone(),
                            p.email.clone(),
                            p.slack.clone(),
                            p.signup_date.format("%Y-%m-%d %H:%M").to_string(),
                        ]
                    })
                    .collect(),
            );
            Ok(())
        }

        ParticipantsSubcommand::Add { name, email, slack } => {
            let signup = controller.add_participant(&name, &email, &slack)?;
            if json {
                print_json(&signup)?;
            } else {
                println!(
                    "added {} to sheet {}",
                    signup.participant.name, signup.roster
                );
            }
            Ok(())
        }
    }
}
