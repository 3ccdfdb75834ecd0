//! Persisted key-value settings in `<home>/arc.properties`.

pub mod properties;

use crate::error::{ArcError, Result};
use crate::home::Home;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Entries of the store, ordered by key.
pub type Properties = BTreeMap<String, String>;

/// Property names the launcher itself understands.
pub const KNOWN_KEYS: &[&str] = &[
    "ARC_AI_KEY",
    "ARC_AI_URL",
    "ARC_MODEL",
    "ARC_CLIENT",
    "ARC_SERVER",
];

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(home: &Home) -> Self {
        Self::at(home.properties_file())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry. A missing file is an empty store.
    ///
    /// Files are written as ASCII with `\uXXXX` escapes, but hand-edited ones
    /// may be UTF-8 or Latin-1; both are accepted.
    pub fn load(&self) -> Result<Properties> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                let entries = properties::parse(&decode(bytes));
                tracing::debug!(
                    path = %self.path.display(),
                    entries = entries.len(),
                    "loaded config store"
                );
                Ok(entries)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Properties::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Replace the file with `entries`.
    ///
    /// The content goes to a temporary file next to the target which is then
    /// renamed over it, so readers see either the old or the new store.
    pub fn save(&self, entries: &Properties) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(properties::render(entries).as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "saved config store");
        Ok(())
    }

    /// Insert or replace `key`, persist, and return the resulting store.
    pub fn set(&self, key: &str, value: &str) -> Result<Properties> {
        if key.trim().is_empty() {
            return Err(ArcError::InvalidArgument(
                "Property name cannot be empty.".to_string(),
            ));
        }

        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)?;
        Ok(entries)
    }

    fn io_error(&self, source: std::io::Error) -> ArcError {
        ArcError::StoreIo {
            path: self.path.clone(),
            source,
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        // Latin-1 maps every byte to the code point of the same value
        e.into_bytes().into_iter().map(char::from).collect()
    })
}

/// Whether `key` is one of the launcher's own settings.
pub fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}
