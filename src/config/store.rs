//! Profile store: every profile found in the dot directory, keyed by name.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::graph;
use super::merge::MergedProfile;
use super::profiles::Profile;
use crate::error::ProfileError;

/// Owns all loaded profiles. Parent links are resolved by name through the
/// store, so profiles never own each other.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// Load every profile definition in `dotdir`.
    ///
    /// A profile is any regular `*.json` file directly inside `dotdir`,
    /// except `state_file_name` and hidden files. A missing directory yields
    /// an empty store.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`] encountered: an unreadable or
    /// malformed profile, an `extends` entry naming an unknown profile, or
    /// an inheritance cycle.
    pub fn load(dotdir: &Path, state_file_name: &str) -> Result<Self, ProfileError> {
        let files = profile_files(dotdir, state_file_name)?;
        let profiles = files
            .iter()
            .map(|path| Profile::load(path))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_profiles(profiles)
    }

    /// Build a store from already-parsed profiles and validate the
    /// inheritance graph.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::MissingReference`] if a profile extends an
    /// unknown profile and [`ProfileError::Cycle`] if `extends` is cyclic.
    pub fn from_profiles(profiles: Vec<Profile>) -> Result<Self, ProfileError> {
        let profiles: BTreeMap<String, Profile> = profiles
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        for profile in profiles.values() {
            if let Some(parent) = profile
                .extends
                .iter()
                .find(|parent| !profiles.contains_key(parent.as_str()))
            {
                return Err(ProfileError::MissingReference {
                    profile: profile.name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        let all: Vec<&Profile> = profiles.values().collect();
        let cyclic = graph::cyclic_profiles(&all);
        if !cyclic.is_empty() {
            return Err(ProfileError::Cycle { profiles: cyclic });
        }

        Ok(Self { profiles })
    }

    /// Look up a profile by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Whether a profile named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// All profile names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of loaded profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profiles were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Direct parents of `profile`, in `extends` order.
    pub fn parents<'a>(&'a self, profile: &'a Profile) -> impl Iterator<Item = &'a Profile> {
        profile
            .extends
            .iter()
            .filter_map(|name| self.profiles.get(name))
    }

    /// Flatten `profile` and its ancestors into the effective view.
    ///
    /// Own entries come first; each parent's flattened view is then folded
    /// in, in `extends` order. Variables are de-duplicated by name, created
    /// directories by path, links and templates by `(src, dst)` pair, with
    /// the first occurrence winning.
    #[must_use]
    pub fn merged(&self, profile: &Profile) -> MergedProfile {
        self.parents(profile)
            .fold(MergedProfile::from(profile), |mut merged, parent| {
                merged.absorb(self.merged(parent));
                merged
            })
    }
}

/// List candidate profile files in `dotdir`, sorted by file name.
fn profile_files(dotdir: &Path, state_file_name: &str) -> Result<Vec<PathBuf>, ProfileError> {
    let io_error = |source| ProfileError::Io {
        path: dotdir.to_path_buf(),
        source,
    };

    let entries = match std::fs::read_dir(dotdir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(io_error)?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_candidate = path.extension().is_some_and(|ext| ext == "json")
            && !file_name.starts_with('.')
            && file_name != state_file_name
            && path.is_file();
        if is_candidate {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
