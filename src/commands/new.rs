use crate::agents::scaffold::{self, ScriptKind};
use crate::error::{ArcError, Result};
use std::path::Path;

pub fn execute(kind: ScriptKind, name: Option<&str>, current: &Path) -> Result<()> {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        let what = match kind {
            ScriptKind::Agent => "agent",
            ScriptKind::Function => "function",
        };
        return Err(ArcError::InvalidArgument(format!(
            "Invalid {what} name. Please provide a valid {what} name."
        )));
    };

    let path = scaffold::create(kind, name, current)?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_requires_name() {
        let tmp = TempDir::new().unwrap();
        let err = execute(ScriptKind::Function, None, tmp.path()).unwrap_err();
        assert!(err.to_string().contains("function name"));
    }

    #[test]
    fn test_creates_script() {
        let tmp = TempDir::new().unwrap();
        execute(ScriptKind::Agent, Some("helper"), tmp.path()).unwrap();
        assert!(tmp.path().join("agents/helper.agent.kts").is_file());
    }
}
