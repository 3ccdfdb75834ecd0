use crate::agents::installer::AgentInstaller;
use crate::error::Result;

pub fn execute(installer: &AgentInstaller) -> Result<()> {
    let agents = installer.list()?;

    if agents.is_empty() {
        println!(
            "No Agents installed in {}. Install one with 'arc install <name>'.",
            installer.agent_dir().display()
        );
        return Ok(());
    }

    println!("The following Agents are installed:");
    for name in agents {
        println!("- {}", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::home::Home;
    use tempfile::TempDir;

    #[test]
    fn test_list_empty_and_populated() {
        let tmp = TempDir::new().unwrap();
        let installer = AgentInstaller::new(&Home::at(tmp.path()));
        execute(&installer).unwrap();

        std::fs::write(tmp.path().join("weather.agent.kts"), "").unwrap();
        execute(&installer).unwrap();
    }
}
