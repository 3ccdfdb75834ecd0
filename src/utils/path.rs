use crate::error::{ArcError, Result};
use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

/// Expand a leading `~` or `~user` to the matching home directory.
///
/// Returns `None` when the home directory cannot be determined. Paths without
/// a leading tilde are returned unchanged.
///
/// # Examples
///
/// ```
/// use arc_runner::utils::path::expand_tilde;
///
/// let path = expand_tilde("/opt/agents").unwrap();
/// assert_eq!(path, std::path::PathBuf::from("/opt/agents"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let Some(after_tilde) = path.to_str().and_then(|s| s.strip_prefix('~')) else {
        return Some(path.to_path_buf());
    };

    if after_tilde.is_empty() || after_tilde.starts_with('/') {
        let home = std::env::var("HOME").ok()?;
        return Some(PathBuf::from(home).join(after_tilde.trim_start_matches('/')));
    }

    let (username, rest) = after_tilde.split_once('/').unwrap_or((after_tilde, ""));
    let user = uzers::get_user_by_name(username)?;
    Some(user.home_dir().join(rest))
}

/// Resolve a user-supplied folder to an absolute, existing directory.
pub fn resolve_folder(folder: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(folder).ok_or_else(|| {
        ArcError::InvalidArgument(format!(
            "Cannot expand '{}': home directory unknown.",
            folder.display()
        ))
    })?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };

    if !absolute.is_dir() {
        return Err(ArcError::InvalidArgument(format!(
            "Agent folder '{}' does not exist.",
            absolute.display()
        )));
    }

    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_expand_tilde_current_user() {
        let home = env::var("HOME").unwrap();

        assert_eq!(expand_tilde("~").unwrap(), PathBuf::from(&home));
        assert_eq!(
            expand_tilde("~/agents/weather").unwrap(),
            PathBuf::from(&home).join("agents/weather")
        );
    }

    #[test]
    fn test_expand_tilde_other_user() {
        // root exists on practically every unix system
        if let Some(path) = expand_tilde("~root/.arc") {
            assert!(path.is_absolute());
            assert!(path.ends_with(".arc"));
        }
    }

    #[test]
    fn test_expand_tilde_unknown_user() {
        assert!(expand_tilde("~nonexistentuser12345/agents").is_none());
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        assert_eq!(
            expand_tilde("relative/agents").unwrap(),
            PathBuf::from("relative/agents")
        );
        assert_eq!(
            expand_tilde("/srv/~agents").unwrap(),
            PathBuf::from("/srv/~agents")
        );
    }

    #[test]
    #[serial]
    fn test_expand_tilde_without_home() {
        let original = env::var_os("HOME");
        env::remove_var("HOME");

        assert!(expand_tilde("~/agents").is_none());

        if let Some(home) = original {
            env::set_var("HOME", home);
        }
    }

    #[test]
    fn test_resolve_folder_existing() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_folder(tmp.path()).unwrap(), tmp.path());
    }

    #[test]
    fn test_resolve_folder_missing() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_folder(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ArcError::InvalidArgument(_)));
    }
}
