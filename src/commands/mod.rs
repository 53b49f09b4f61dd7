//! Top-level command handlers and their shared setup.
pub mod apply;
pub mod init;
pub mod profiles;
pub mod report;
pub mod version;

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Profile, ProfileStore, StateFile};
use crate::logging::Log;

/// Shared state produced by the common command setup sequence.
///
/// Loads the state file and every profile in the dot directory so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Directory holding profiles and the state file.
    pub dotdir: PathBuf,
    /// Persisted profile selection.
    pub state: StateFile,
    /// All loaded profiles.
    pub store: ProfileStore,
}

impl CommandSetup {
    /// Load the state file and all profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file is malformed, or any profile fails
    /// to load or references an unknown or cyclic parent.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let state_path = global.state_path();
        log.debug(&format!("state file: {}", state_path.display()));
        let state = StateFile::load(&state_path)?;

        let store = ProfileStore::load(&global.dotdir, &global.statefile)?;
        log.debug(&format!(
            "loaded {} profile(s) from {}",
            store.len(),
            global.dotdir.display()
        ));
        if let Some(current) = &state.profile {
            log.debug(&format!("current profile: {current}"));
        }

        Ok(Self {
            dotdir: global.dotdir.clone(),
            state,
            store,
        })
    }

    /// The profile recorded in the state file.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile is selected or the selected profile no
    /// longer exists.
    pub fn selected(&self) -> Result<&Profile> {
        let Some(name) = self.state.profile.as_deref() else {
            anyhow::bail!("Please run \"dotref init\" first to select a profile");
        };
        self.find(name)
    }

    /// Look up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile has that name.
    pub fn find(&self, name: &str) -> Result<&Profile> {
        self.store
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Profile \"{name}\" not found"))
    }
}

/// One line of command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Section header, logged as a stage.
    Header(String),
    /// Regular output, logged as info.
    Text(String),
}

impl Line {
    /// A regular line.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// An empty separator line.
    #[must_use]
    pub const fn blank() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(s) | Self::Text(s) => f.write_str(s),
        }
    }
}

/// Send rendered output through the logger.
pub fn emit(log: &dyn Log, lines: &[Line]) {
    for line in lines {
        match line {
            Line::Header(s) => log.stage(s),
            Line::Text(s) => log.info(s),
        }
    }
}
