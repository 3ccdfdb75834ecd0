use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid Agent name '{0}'. Please provide a valid Agent name without '.' or '/'.")]
    InvalidName(String),

    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "No AI credentials configured. Set ARC_AI_URL and/or ARC_AI_KEY, either as environment \
         variables or with 'arc set ARC_AI_URL=<url>' and 'arc set ARC_AI_KEY=<key>'."
    )]
    MissingCredentials,

    #[error("Cannot access config store {}: {source}", path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Server command '{0}' not found. Install the Arc server or point ARC_SERVER at it.")]
    ServerNotFound(String),

    #[error("Failed to start server: {0}")]
    ServerStart(String),

    #[error("Server exited with status {0}")]
    ServerExit(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArcError {
    /// Process exit code for this error. Usage mistakes share clap's code 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArcError::InvalidArgument(_) | ArcError::InvalidName(_) => 2,
            ArcError::ServerExit(code) => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArcError>;
