//! The Arc home directory (`~/.arc`).
//!
//! Holds both the persisted properties file and the installed agent scripts.
//! Every component receives a `Home` explicitly so tests can point it at a
//! temporary directory.

use crate::error::{ArcError, Result};
use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

/// Name of the directory created under the user's home.
pub const DIR_NAME: &str = ".arc";

/// Name of the properties file inside the home directory.
pub const PROPERTIES_FILE: &str = "arc.properties";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    /// Use `root` as the Arc home directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate `~/.arc` for the invoking user.
    ///
    /// `HOME` wins when set; otherwise the passwd entry of the current user is used.
    pub fn from_env() -> Result<Self> {
        let user_home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                uzers::get_user_by_uid(uzers::get_current_uid())
                    .map(|user| user.home_dir().to_path_buf())
            })
            .ok_or_else(|| {
                ArcError::InvalidArgument(
                    "Cannot determine the home directory. Set HOME and retry.".to_string(),
                )
            })?;

        Ok(Self::at(user_home.join(DIR_NAME)))
    }

    /// Create the directory (and parents) if it does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|source| ArcError::Write {
            path: self.root.clone(),
            source,
        })?;
        tracing::debug!(home = %self.root.display(), "home directory ready");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn properties_file(&self) -> PathBuf {
        self.root.join(PROPERTIES_FILE)
    }

    /// Directory scanned for installed `*.agent.kts` files.
    pub fn agent_dir(&self) -> &Path {
        &self.root
    }
}
