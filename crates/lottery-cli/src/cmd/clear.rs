use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let controller = super::open(root)?;
    controller.clear_all()?;
    let status = controller.status()?;
    if json {
        crate::output::print_json(&status)?;
    } else {
        println!("All cleared, reset to sheet {}", status.active_signup_sheet);
    }
    Ok(())
}
