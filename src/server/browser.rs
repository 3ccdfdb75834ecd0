//! Opening the chat UI once the server is up.

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Called once the server process is up and running.
pub trait PostStartHook {
    fn on_started(&self, url: &str);
}

/// Opens the chat UI in the desktop browser, or prints the address when the
/// platform has no opener.
pub struct BrowserHook {
    opener: Option<PathBuf>,
}

impl BrowserHook {
    /// Look up the platform opener on `PATH`.
    pub fn detect() -> Self {
        let candidate = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        Self {
            opener: which::which(candidate).ok(),
        }
    }

    /// Never open a browser, only print the address.
    pub fn print_only() -> Self {
        Self { opener: None }
    }
}

impl PostStartHook for BrowserHook {
    fn on_started(&self, url: &str) {
        let Some(opener) = &self.opener else {
            println!("Open {} in a browser to chat to Arc...", url);
            return;
        };

        println!("Opening Arc View...");
        let status = Command::new(opener)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => {}
            Ok(s) => {
                tracing::debug!(opener = %opener.display(), status = ?s.code(), "opener failed");
                println!("Open {} in a browser to chat to Arc...", url);
            }
            Err(e) => {
                tracing::debug!(opener = %opener.display(), error = %e, "cannot run opener");
                println!("Open {} in a browser to chat to Arc...", url);
            }
        }
    }
}

/// Hook that does nothing.
pub struct NoopHook;

impl PostStartHook for NoopHook {
    fn on_started(&self, _url: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_only_has_no_opener() {
        let hook = BrowserHook::print_only();
        assert!(hook.opener.is_none());
        // Must not panic or spawn anything
        hook.on_started("http://localhost:8080/chat/index.html");
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_opener_is_not_fatal() {
        let hook = BrowserHook {
            opener: Some(PathBuf::from("false")),
        };
        hook.on_started("http://localhost:8080/chat/index.html");
    }

    #[test]
    fn test_missing_opener_binary_is_not_fatal() {
        let hook = BrowserHook {
            opener: Some(PathBuf::from("/nonexistent/opener-binary")),
        };
        hook.on_started("http://localhost:8080/chat/index.html");
    }
}
