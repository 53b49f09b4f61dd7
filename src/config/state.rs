//! Persisted selection of the current profile.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// On-disk shape: `{"profile": "<name>"}` or `{}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<String>,
}

/// The state file kept in the dot directory.
///
/// Loaded once at command start; only `init` changes the selection, and
/// [`save`](Self::save) persists it immediately.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
    /// Currently selected profile, if any.
    pub profile: Option<String>,
}

impl StateFile {
    /// Read the state file at `path`; a missing file means nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] if the file exists but cannot be read, and
    /// [`StateError::Invalid`] if it is not a valid state record (for
    /// example, a non-string `profile`).
    pub fn load(path: &Path) -> Result<Self, StateError> {
        if !path.is_file() {
            return Ok(Self {
                path: path.to_path_buf(),
                profile: None,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record: StateRecord =
            serde_json::from_str(&content).map_err(|source| StateError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            profile: record.profile.filter(|p| !p.is_empty()),
        })
    }

    /// Select `profile` as the current profile (not yet persisted).
    pub fn select(&mut self, profile: &str) {
        self.profile = Some(profile.to_string());
    }

    /// Write the current selection to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] if the file cannot be written.
    pub fn save(&self) -> Result<(), StateError> {
        let record = StateRecord {
            profile: self.profile.clone(),
        };
        let json = serde_json::to_string(&record).map_err(|source| StateError::Invalid {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| StateError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_unset() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateFile::load(&dir.path().join(".dotref.json")).unwrap();
        assert!(state.profile.is_none());
    }

    #[test]
    fn empty_object_means_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(StateFile::load(&path).unwrap().profile.is_none());
    }

    #[test]
    fn reads_selected_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        std::fs::write(&path, r#"{"profile": "laptop"}"#).unwrap();
        assert_eq!(
            StateFile::load(&path).unwrap().profile.as_deref(),
            Some("laptop")
        );
    }

    #[test]
    fn non_string_profile_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        std::fs::write(&path, r#"{"profile": 42}"#).unwrap();
        let err = StateFile::load(&path).unwrap_err();
        assert!(matches!(err, StateError::Invalid { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        std::fs::write(&path, "{").unwrap();
        assert!(StateFile::load(&path).is_err());
    }

    #[test]
    fn save_writes_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        let mut state = StateFile::load(&path).unwrap();
        state.select("desktop");
        state.save().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"profile":"desktop"}"#
        );
        assert_eq!(
            StateFile::load(&path).unwrap().profile.as_deref(),
            Some("desktop")
        );
    }

    #[test]
    fn save_unset_writes_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        StateFile::load(&path).unwrap().save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn reselect_overwrites_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dotref.json");
        std::fs::write(&path, r#"{"profile": "old"}"#).unwrap();

        let mut state = StateFile::load(&path).unwrap();
        state.select("new");
        state.save().unwrap();
        assert_eq!(
            StateFile::load(&path).unwrap().profile.as_deref(),
            Some("new")
        );
    }
}
