//! Starting the Arc server with an effective configuration.
//!
//! The server itself is an external program. It receives the configuration
//! as a JSON object in `SPRING_APPLICATION_JSON`, which keeps credentials out
//! of the process argument list.

pub mod browser;

use crate::config::EffectiveConfig;
use crate::error::{ArcError, Result};
use browser::PostStartHook;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Environment variable carrying the configuration to the server.
pub const CONFIG_ENV: &str = "SPRING_APPLICATION_JSON";

/// How long a freshly spawned server has to fail before it counts as started.
const STARTUP_GRACE: Duration = Duration::from_secs(3);

/// Starts the server and blocks until it terminates.
pub trait ServerLauncher {
    fn start(&self, config: &EffectiveConfig) -> Result<()>;
}

pub struct ProcessLauncher {
    program: PathBuf,
    args: Vec<String>,
    hook: Box<dyn PostStartHook>,
    startup_grace: Duration,
}

impl ProcessLauncher {
    /// Build a launcher from a server command line such as
    /// `arc-server` or `java -jar /opt/arc/arc-runner.jar`.
    ///
    /// Arguments are split on whitespace; the program is looked up on `PATH`
    /// unless it is a path already.
    pub fn locate(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let command = parts
            .next()
            .ok_or_else(|| ArcError::ServerNotFound(command_line.to_string()))?;
        let program =
            which::which(command).map_err(|_| ArcError::ServerNotFound(command.to_string()))?;
        tracing::debug!(program = %program.display(), "located server");

        let mut launcher = Self::new(program);
        launcher.args = parts.map(String::from).collect();
        Ok(launcher)
    }

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            hook: Box::new(browser::NoopHook),
            startup_grace: STARTUP_GRACE,
        }
    }

    pub fn with_hook(mut self, hook: Box<dyn PostStartHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_startup_grace(mut self, grace: Duration) -> Self {
        self.startup_grace = grace;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl ServerLauncher for ProcessLauncher {
    fn start(&self, config: &EffectiveConfig) -> Result<()> {
        let payload = serde_json::to_string(config)
            .map_err(|e| ArcError::ServerStart(format!("cannot encode configuration: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(CONFIG_ENV, payload)
            .spawn()
            .map_err(|e| {
                ArcError::ServerStart(format!("{}: {}", self.program.display(), e))
            })?;
        tracing::info!(pid = child.id(), program = %self.program.display(), "server started");

        let status = match child.wait_timeout(self.startup_grace)? {
            Some(status) => status,
            None => {
                self.hook.on_started(&config.chat_url());
                child.wait()?
            }
        };

        tracing::info!(status = ?status.code(), "server stopped");
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(ArcError::ServerExit(code)),
            // Killed by a signal
            None => Ok(()),
        }
    }
}
