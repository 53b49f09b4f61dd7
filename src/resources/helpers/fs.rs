//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Resolve a path as written in a profile.
///
/// `~` and `~/…` expand to `home`; any other relative path is joined onto
/// `root` (the directory the command was started in). Absolute paths are
/// returned unchanged.
///
/// # Errors
///
/// Returns an error if `raw` starts with `~` and `home` is unknown.
pub fn resolve_path(raw: &str, home: Option<&Path>, root: &Path) -> Result<PathBuf> {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
            .or_else(|| raw.strip_prefix("~\\").filter(|_| cfg!(windows)))
    };
    if let Some(rest) = rest {
        let home = home
            .with_context(|| format!("cannot expand \"{raw}\": home directory is not set"))?;
        return Ok(if rest.is_empty() {
            home.to_path_buf()
        } else {
            home.join(rest)
        });
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(root.join(path))
    }
}

/// Whether anything (including a dangling symlink) occupies `path`.
#[must_use]
pub fn is_present(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ensure_parent_dir_creates_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a").join("b").join("file.txt");
        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        assert!(!file.exists());
    }

    #[test]
    fn ensure_parent_dir_tolerates_existing() {
        let dir = tempfile::tempdir().unwrap();
        ensure_parent_dir(&dir.path().join("file.txt")).unwrap();
    }

    fn resolve(raw: &str) -> PathBuf {
        resolve_path(raw, Some(Path::new("/home/user")), Path::new("/work")).unwrap()
    }

    #[test]
    fn tilde_alone_is_home() {
        assert_eq!(resolve("~"), Path::new("/home/user"));
    }

    #[test]
    fn tilde_prefix_joins_home() {
        assert_eq!(resolve("~/.bashrc"), PathBuf::from("/home/user/.bashrc"));
    }

    #[test]
    fn relative_joins_root() {
        assert_eq!(resolve("files/bashrc"), PathBuf::from("/work/files/bashrc"));
    }

    #[test]
    fn tilde_user_form_is_relative() {
        assert_eq!(resolve("~other/x"), PathBuf::from("/work/~other/x"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_is_unchanged() {
        assert_eq!(resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn missing_home_only_matters_for_tilde() {
        let root = Path::new("/work");
        assert_eq!(
            resolve_path("files/x", None, root).unwrap(),
            PathBuf::from("/work/files/x")
        );
        let err = resolve_path("~/.bashrc", None, root).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot expand \"~/.bashrc\": home directory is not set"
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_present() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &link).unwrap();
        assert!(is_present(&link));
        assert!(!link.exists());
        assert!(!is_present(&dir.path().join("nothing")));
    }
}
