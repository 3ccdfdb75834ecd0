//! Download agent scripts into the home directory and enumerate installed ones.

use super::{AgentName, AGENT_SUFFIX};
use crate::error::{ArcError, Result};
use crate::home::Home;
use std::fs::Permissions;
use std::io::{Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public location of the agent scripts published with Arc.
pub const DEFAULT_REPOSITORY: &str =
    "https://raw.githubusercontent.com/eclipse-lmos/arc/main/arc-runner";

/// Agent scripts are small; anything bigger is not an agent.
const MAX_SCRIPT_BYTES: u64 = 4 * 1024 * 1024;

/// Installed scripts must be readable by a server running as another user.
const SCRIPT_MODE: u32 = 0o644;

pub struct AgentInstaller {
    agent_dir: PathBuf,
    base_url: String,
    http: ureq::Agent,
}

impl AgentInstaller {
    pub fn new(home: &Home) -> Self {
        let http = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .user_agent(concat!("arc-runner/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent_dir: home.agent_dir().to_path_buf(),
            base_url: DEFAULT_REPOSITORY.to_string(),
            http,
        }
    }

    /// Fetch agents from `base_url` instead of the public repository.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn agent_dir(&self) -> &Path {
        &self.agent_dir
    }

    pub fn url_for(&self, name: &AgentName) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name.file_name())
    }

    /// Download `name` and place it in the agent directory, replacing any
    /// previous copy. Returns the path of the installed script.
    ///
    /// The name is validated before any network or filesystem access. The
    /// download lands in a temporary file that is renamed into place, so a
    /// failed install leaves every existing script as it was.
    pub fn install(&self, name: &str) -> Result<PathBuf> {
        let name = AgentName::parse(name)?;
        let url = self.url_for(&name);
        let target = self.agent_dir.join(name.file_name());

        let script = self.download(&url)?;
        self.write_atomically(&target, &script)?;

        tracing::info!(agent = %name, path = %target.display(), "installed agent");
        Ok(target)
    }

    /// Names of installed agents, in directory order.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.agent_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(AGENT_SUFFIX) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "downloading agent");

        let response = self.http.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, response) => ArcError::Download {
                url: url.to_string(),
                reason: format!("HTTP {} {}", code, response.status_text()),
            },
            ureq::Error::Transport(transport) => ArcError::Download {
                url: url.to_string(),
                reason: transport.to_string(),
            },
        })?;

        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_SCRIPT_BYTES + 1)
            .read_to_end(&mut body)
            .map_err(|e| ArcError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if body.len() as u64 > MAX_SCRIPT_BYTES {
            return Err(ArcError::Download {
                url: url.to_string(),
                reason: format!("response larger than {} bytes", MAX_SCRIPT_BYTES),
            });
        }

        Ok(body)
    }

    fn write_atomically(&self, target: &Path, content: &[u8]) -> Result<()> {
        let write_error = |source| ArcError::Write {
            path: target.to_path_buf(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&self.agent_dir).map_err(write_error)?;
        tmp.write_all(content).map_err(write_error)?;
        tmp.as_file()
            .set_permissions(Permissions::from_mode(SCRIPT_MODE))
            .map_err(write_error)?;
        tmp.persist(target).map_err(|e| write_error(e.error))?;
        Ok(())
    }
}
