use crate::error::{ArcError, Result};
use crate::store::{self, ConfigStore, Properties};
use crate::utils::env::parse_assignment;

pub fn execute(store: &ConfigStore, assignment: Option<&str>, value: Option<&str>) -> Result<()> {
    let (key, value) = parse_args(assignment, value)?;

    if !store::is_known_key(&key) {
        eprintln!(
            "Note: '{}' is not one of {:?}; it is stored and passed to the server as-is.",
            key,
            store::KNOWN_KEYS
        );
    }

    let entries = store.set(&key, &value)?;
    tracing::debug!(key = %key, "property stored");

    println!("Properties in {}:", store.path().display());
    for line in render_listing(&entries) {
        println!("  {}", line);
    }

    Ok(())
}

fn parse_args(assignment: Option<&str>, value: Option<&str>) -> Result<(String, String)> {
    match (assignment, value) {
        (None, _) => Err(ArcError::InvalidArgument(
            "Please provide a property to set, e.g. 'arc set ARC_AI_URL=https://...'".to_string(),
        )),
        (Some(assignment), None) => parse_assignment(assignment),
        (Some(key), Some(_)) if key.contains('=') => Err(ArcError::InvalidArgument(format!(
            "Invalid property format: '{}' followed by another value. Use either 'arc set KEY=VALUE' or 'arc set KEY VALUE'.",
            key
        ))),
        (Some(key), Some(_)) if key.trim().is_empty() => Err(ArcError::InvalidArgument(
            "Invalid property name. Property name cannot be empty.".to_string(),
        )),
        (Some(key), Some(value)) => Ok((key.trim().to_string(), value.to_string())),
    }
}

/// One `key=value` line per entry, with secrets masked.
pub fn render_listing(entries: &Properties) -> Vec<String> {
    entries
        .iter()
        .map(|(key, value)| {
            if is_secret(key) && !value.is_empty() {
                format!("{}=********", key)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect()
}

fn is_secret(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["key", "secret", "password", "token"]
        .iter()
        .any(|marker| key.contains(marker))
}
