//! Directory creation resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs::is_present;
use super::{ActionOutcome, ActionState, Command, Resource};

/// A directory that should exist, optionally with a specific mode.
#[derive(Debug, Clone)]
pub struct DirectoryResource {
    /// Path as written in the profile.
    pub label: String,
    /// Resolved absolute path.
    pub path: PathBuf,
    /// Permission bits for the final path segment (unix only).
    pub mode: Option<u32>,
}

impl DirectoryResource {
    /// Create a new directory resource. A mode of `0` means the default mode.
    #[must_use]
    pub fn new(label: impl Into<String>, path: PathBuf, mode: Option<u32>) -> Self {
        Self {
            label: label.into(),
            path,
            mode: mode.filter(|m| *m != 0),
        }
    }

    fn outcome(&self, state: ActionState) -> ActionOutcome {
        ActionOutcome::single(state, &self.label)
    }

    fn create(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent: {}", parent.display()))?;
        }

        let mut builder = std::fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            if let Some(mode) = self.mode {
                builder.mode(mode);
            }
        }

        match builder.create(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && self.path.is_dir() => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("create directory: {}", self.path.display()))
            }
        }
    }
}

impl Resource for DirectoryResource {
    fn description(&self) -> String {
        match self.mode {
            Some(mode) => format!("{} (mode {mode:o})", self.path.display()),
            None => self.path.display().to_string(),
        }
    }

    fn apply(&self, command: Command) -> Result<ActionOutcome> {
        if self.path.is_dir() {
            return Ok(self.outcome(ActionState::Ok));
        }
        if is_present(&self.path) {
            return Ok(self.outcome(ActionState::Conflict));
        }

        let state = match command {
            Command::Status => ActionState::Missing,
            Command::Unlink => ActionState::Ok,
            Command::Sync => {
                self.create()?;
                ActionState::Created
            }
        };
        Ok(self.outcome(state))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn resource(dir: &tempfile::TempDir, rel: &str, mode: Option<u32>) -> DirectoryResource {
        DirectoryResource::new(rel, dir.path().join(rel), mode)
    }

    #[test]
    fn description_includes_mode() {
        let r = DirectoryResource::new("~/x", PathBuf::from("/h/x"), Some(0o750));
        assert!(r.description().ends_with("(mode 750)"));
    }

    #[test]
    fn status_on_fresh_path_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "fresh", None);
        let outcome = r.apply(Command::Status).unwrap();
        assert_eq!(outcome.state, ActionState::Missing);
        assert_eq!(outcome.primary, PathBuf::from("fresh"));
        assert!(!r.path.exists());
    }

    #[test]
    fn sync_creates_then_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "a/b/c", None);
        assert_eq!(r.apply(Command::Sync).unwrap().state, ActionState::Created);
        assert!(r.path.is_dir());
        assert_eq!(r.apply(Command::Sync).unwrap().state, ActionState::Ok);
    }

    #[test]
    fn unlink_never_removes() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "keep", None);
        assert_eq!(r.apply(Command::Unlink).unwrap().state, ActionState::Ok);
        assert!(!r.path.exists());

        r.apply(Command::Sync).unwrap();
        assert_eq!(r.apply(Command::Unlink).unwrap().state, ActionState::Ok);
        assert!(r.path.is_dir());
    }

    #[test]
    fn file_in_the_way_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "occupied", None);
        std::fs::write(&r.path, "data").unwrap();
        for command in [Command::Status, Command::Sync, Command::Unlink] {
            assert_eq!(r.apply(command).unwrap().state, ActionState::Conflict);
        }
        assert_eq!(std::fs::read_to_string(&r.path).unwrap(), "data");
    }

    #[cfg(unix)]
    #[test]
    fn sync_applies_mode_to_final_segment() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "outer/private", Some(0o700));
        assert_eq!(r.apply(Command::Sync).unwrap().state, ActionState::Created);

        let mode = std::fs::metadata(&r.path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn zero_mode_uses_default_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "plain", Some(0));
        assert_eq!(r.mode, None);
        assert!(!r.description().contains("mode"));
        assert_eq!(r.apply(Command::Sync).unwrap().state, ActionState::Created);

        let mode = std::fs::metadata(&r.path).unwrap().permissions().mode() & 0o777;
        assert_ne!(mode, 0);
        assert!(std::fs::read_dir(&r.path).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "dangling", None);
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &r.path).unwrap();
        assert_eq!(r.apply(Command::Sync).unwrap().state, ActionState::Conflict);
    }
}
