//! Agent scripts: name validation, installation from the public repository,
//! and scaffolding of new scripts.

pub mod installer;
pub mod scaffold;

use crate::error::{ArcError, Result};
use std::fmt;
use std::str::FromStr;

/// File suffix of installed agent scripts.
pub const AGENT_SUFFIX: &str = ".agent.kts";

/// A validated agent name.
///
/// Names never contain `.` or `/`, so `<name>.agent.kts` always stays inside
/// the directory it is joined onto.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentName(String);

impl AgentName {
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains('.') || name.contains('/') {
            return Err(ArcError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<name>.agent.kts`
    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, AGENT_SUFFIX)
    }
}

impl FromStr for AgentName {
    type Err = ArcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["weather", "my-agent", "agent_2", "Wetter"] {
            let parsed = AgentName::parse(name).unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_rejects_path_unsafe_names() {
        for name in ["", "../evil", "evil/..", "a.b", "weather.agent", "/etc/passwd", "."] {
            let err = AgentName::parse(name).unwrap_err();
            assert!(
                matches!(err, ArcError::InvalidName(ref n) if n == name),
                "expected InvalidName for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_file_name() {
        let name: AgentName = "weather".parse().unwrap();
        assert_eq!(name.file_name(), "weather.agent.kts");
        assert_eq!(name.to_string(), "weather");
    }
}
