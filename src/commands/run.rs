use crate::config::ConfigResolver;
use crate::error::Result;
use crate::server::ServerLauncher;
use crate::utils::path::resolve_folder;
use std::path::{Path, PathBuf};

/// Resolve the effective configuration and hand it to `launch`.
///
/// `launch` receives the resolver as well so the default launcher can look
/// up its server command. It is never called when resolution fails.
pub fn execute<F>(resolver: &ConfigResolver, folder: Option<&Path>, launch: F) -> Result<()>
where
    F: FnOnce(&ConfigResolver) -> Result<Box<dyn ServerLauncher>>,
{
    println!("Starting Arc Runner...");

    let folder = scripts_folder(folder)?;
    let config = resolver.resolve(folder.as_deref())?;
    tracing::debug!(
        folder = config.get(crate::config::SCRIPTS_FOLDER).unwrap_or_default(),
        "agents folder"
    );

    let launcher = launch(resolver)?;
    launcher.start(&config)
}

/// `HOME` (or nothing) means the home directory, which is the resolver's default.
fn scripts_folder(folder: Option<&Path>) -> Result<Option<PathBuf>> {
    match folder {
        None => Ok(None),
        Some(f) if f.as_os_str().is_empty() || f == Path::new("HOME") => Ok(None),
        Some(f) => resolve_folder(f).map(Some),
    }
}
