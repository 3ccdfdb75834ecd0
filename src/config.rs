//! Effective configuration for `arc run`.
//!
//! Every key resolves through one chain: CLI argument, then environment
//! variable of the same name, then the persisted store, then a built-in
//! default. Credentials have no default.

use crate::error::{ArcError, Result};
use crate::home::Home;
use crate::store::Properties;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const AI_KEY: &str = "ARC_AI_KEY";
pub const AI_URL: &str = "ARC_AI_URL";
pub const MODEL: &str = "ARC_MODEL";
pub const CLIENT: &str = "ARC_CLIENT";
pub const SERVER: &str = "ARC_SERVER";

pub const DEFAULT_MODEL: &str = "GPT-4o";
pub const DEFAULT_CLIENT: &str = "azure";
pub const DEFAULT_SERVER: &str = "arc-server";
pub const DEFAULT_PORT: u16 = 8080;

pub const SCRIPTS_FOLDER: &str = "arc.scripts.folder";
pub const SERVER_PORT: &str = "server.port";
const CLIENT_PREFIX: &str = "arc.ai.clients[0]";

/// Operational defaults. The scripts folder default is the home directory
/// and is added separately.
const DEFAULTS: &[(&str, &str)] = &[
    ("arc.chat.ui.enabled", "true"),
    ("arc.scripts.hotReload.enable", "true"),
    ("spring.main.banner-mode", "off"),
    ("logging.level.root", "WARN"),
    ("logging.level.ArcDSL", "DEBUG"),
    ("logging.level.org.eclipse.lmos.arc", "DEBUG"),
];

/// Source of environment variables.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        crate::utils::env::non_empty_var(key)
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// The configuration handed to the server. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectiveConfig {
    entries: BTreeMap<String, String>,
}

impl EffectiveConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Port the server will listen on.
    pub fn port(&self) -> u16 {
        self.get(SERVER_PORT)
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// Address of the chat UI served by the running server.
    pub fn chat_url(&self) -> String {
        chat_url(self.port())
    }
}

pub fn chat_url(port: u16) -> String {
    format!("http://localhost:{}/chat/index.html", port)
}

pub struct ConfigResolver<'a> {
    home: &'a Home,
    store: &'a Properties,
    env: &'a dyn Environment,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(home: &'a Home, store: &'a Properties, env: &'a dyn Environment) -> Self {
        Self { home, store, env }
    }

    /// Environment first, then the store.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.env
            .var(key)
            .or_else(|| self.store.get(key).filter(|v| !v.is_empty()).cloned())
    }

    /// Command used to start the server.
    pub fn server_command(&self) -> String {
        self.lookup(SERVER).unwrap_or_else(|| DEFAULT_SERVER.to_string())
    }

    /// Build the effective configuration. `scripts_folder` is the folder
    /// given on the command line, if any.
    ///
    /// Fails with [`ArcError::MissingCredentials`] when neither `ARC_AI_URL`
    /// nor `ARC_AI_KEY` resolve.
    pub fn resolve(&self, scripts_folder: Option<&Path>) -> Result<EffectiveConfig> {
        let url = self.lookup(AI_URL);
        let key = self.lookup(AI_KEY);
        if url.is_none() && key.is_none() {
            return Err(ArcError::MissingCredentials);
        }

        let mut entries: BTreeMap<String, String> = DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        entries.insert(
            SCRIPTS_FOLDER.to_string(),
            self.home.root().display().to_string(),
        );

        for (k, v) in self.store {
            entries.insert(k.clone(), v.clone());
        }

        // Environment overrides apply per key, including the credentials
        // which may only exist in the environment.
        let keys: Vec<String> = entries
            .keys()
            .cloned()
            .chain([AI_URL, AI_KEY, MODEL, CLIENT].map(String::from))
            .collect();
        for k in keys {
            if let Some(v) = self.env.var(&k) {
                tracing::debug!(key = %k, "using environment value");
                entries.insert(k, v);
            }
        }

        if let Some(folder) = scripts_folder {
            entries.insert(SCRIPTS_FOLDER.to_string(), folder.display().to_string());
        }

        let model = self.lookup(MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let client = self.lookup(CLIENT).unwrap_or_else(|| DEFAULT_CLIENT.to_string());
        entries.insert(format!("{}.id", CLIENT_PREFIX), model.clone());
        entries.insert(format!("{}.model-name", CLIENT_PREFIX), model);
        entries.insert(format!("{}.client", CLIENT_PREFIX), client);
        if let Some(url) = url {
            entries.insert(format!("{}.url", CLIENT_PREFIX), url);
        }
        if let Some(key) = key {
            entries.insert(format!("{}.apiKey", CLIENT_PREFIX), key);
        }

        tracing::debug!(entries = entries.len(), "resolved effective configuration");
        Ok(EffectiveConfig { entries })
    }
}
