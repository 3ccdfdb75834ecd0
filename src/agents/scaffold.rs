//! Starter scripts for `arc new` and `arc fun`.

use super::AgentName;
use crate::error::{ArcError, Result};
use std::path::{Path, PathBuf};

/// Kind of script to scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Agent,
    Function,
}

impl ScriptKind {
    fn suffix(self) -> &'static str {
        match self {
            ScriptKind::Agent => super::AGENT_SUFFIX,
            ScriptKind::Function => ".functions.kts",
        }
    }

    fn render(self, name: &AgentName) -> String {
        match self {
            ScriptKind::Agent => format!(
                r#"agent {{
  name = "{name}"
  prompt = {{
    """
      ### Role and Responsibilities ###
      You are a helpful assistant.

      ## Instructions
      - Always answer with 'Arc is ready to assist you in creating the future of Agents!.'
    """
  }}
}}
"#
            ),
            ScriptKind::Function => format!(
                r#"function(
    name = "{name}",
    description = "Returns content from the web.",
    params = types(
        string("url", "The URL of the content to fetch.")
    )
) {{ (url) ->
   httpGet(url.toString())
}}
"#
            ),
        }
    }
}

/// Folder new scripts go into when working from `current`.
///
/// A folder whose name mentions "agent" is used as is; anywhere else the
/// scripts go into an `agents` subfolder.
pub fn target_folder(current: &Path) -> PathBuf {
    let is_agent_folder = current
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase().contains("agent"))
        .unwrap_or(false);

    if is_agent_folder {
        current.to_path_buf()
    } else {
        current.join("agents")
    }
}

/// Write a starter script named `name` below `current` and return its path.
/// Existing files are never overwritten.
pub fn create(kind: ScriptKind, name: &str, current: &Path) -> Result<PathBuf> {
    let name = AgentName::parse(name)?;
    let folder = target_folder(current);
    let path = folder.join(format!("{}{}", name, kind.suffix()));

    if path.exists() {
        return Err(ArcError::InvalidArgument(format!(
            "{} already exists. Pick another name or remove the file first.",
            path.display()
        )));
    }

    std::fs::create_dir_all(&folder).map_err(|source| ArcError::Write {
        path: folder.clone(),
        source,
    })?;
    std::fs::write(&path, kind.render(&name)).map_err(|source| ArcError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?kind, "scaffolded script");
    Ok(path)
}
