//! Execution context shared by every task.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::MergedProfile;
use crate::logging::Log;
use crate::resources::Command;
use crate::resources::helpers::fs::resolve_path;

/// Shared context for task execution.
pub struct Context {
    /// Flattened profile whose actions are applied.
    pub profile: MergedProfile,
    /// Command being executed.
    pub command: Command,
    /// Logger for output.
    pub log: Arc<dyn Log>,
    /// User's home directory path (target of `~`), if known.
    pub home: Option<PathBuf>,
    /// Directory relative profile paths resolve against.
    pub root: PathBuf,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("profile", &self.profile.name)
            .field("command", &self.command)
            .field("log", &"<dyn Log>")
            .field("home", &self.home)
            .field("root", &self.root)
            .finish()
    }
}

impl Context {
    /// Creates a context rooted at the current working directory.
    ///
    /// The home directory comes from HOME (USERPROFILE first on Windows) and
    /// is only required once a `~` path is resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new(profile: MergedProfile, command: Command, log: Arc<dyn Log>) -> Result<Self> {
        let home = if cfg!(target_os = "windows") {
            std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"))
        } else {
            std::env::var_os("HOME")
        }
        .filter(|h| !h.is_empty())
        .map(PathBuf::from);
        let root = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("cannot determine working directory: {e}"))?;

        Ok(Self::with_paths(profile, command, log, home, root))
    }

    /// Creates a context with explicit home and root directories.
    #[must_use]
    pub fn with_paths(
        profile: MergedProfile,
        command: Command,
        log: Arc<dyn Log>,
        home: Option<PathBuf>,
        root: PathBuf,
    ) -> Self {
        Self {
            profile,
            command,
            log,
            home,
            root,
        }
    }

    /// Resolve a path as written in the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the path uses `~` and no home directory is known.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf> {
        resolve_path(raw, self.home.as_deref(), &self.root)
    }
}
