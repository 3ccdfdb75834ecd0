use crate::agents::installer::AgentInstaller;
use crate::agents::AgentName;
use crate::error::{ArcError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn execute(installer: &AgentInstaller, name: Option<&str>) -> Result<()> {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Err(ArcError::InvalidArgument(
            "Invalid Agent name. Please provide the name of the Agent to install, e.g. 'arc install weather'."
                .to_string(),
        ));
    };
    // Reject bad names before anything is printed or fetched
    let agent = AgentName::parse(name)?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Installing Agent '{}'...", agent));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = installer.install(agent.as_str());
    spinner.finish_and_clear();

    let path = result?;
    println!("Installed Agent '{}' to {}", agent, path.display());
    Ok(())
}
