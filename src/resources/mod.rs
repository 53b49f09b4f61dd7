//! Idempotent filesystem actions driven by a [`Command`].
//!
//! Every action inspects the filesystem, classifies what it finds into an
//! [`ActionState`], and (for [`Command::Sync`] and [`Command::Unlink`])
//! changes it only when the classification calls for it. Running the same
//! command twice is always safe.
pub mod directory;
pub mod helpers;
pub mod symlink;
pub mod template;

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

pub use directory::DirectoryResource;
pub use symlink::SymlinkResource;
pub use template::TemplateResource;

/// What to do with each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Report the current state; never touch the filesystem.
    Status,
    /// Create whatever is missing and refresh rendered templates.
    Sync,
    /// Remove links and rendered files that match the profile exactly.
    /// Created directories are never removed.
    Unlink,
}

impl Command {
    /// Lower-case command name as typed on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Sync => "sync",
            Self::Unlink => "unlink",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single action after it ran.
///
/// # Examples
///
/// ```
/// use dotref::resources::ActionState;
///
/// assert_eq!(ActionState::Conflict.to_string(), "CONFLICT");
/// assert!(ActionState::Linked.is_change());
/// assert!(!ActionState::Missing.is_change());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Already in the desired state (or nothing to undo).
    Ok,
    /// Not present; `sync` would create it.
    Missing,
    /// Something else occupies the path; never overwritten.
    Conflict,
    /// Directory was created.
    Created,
    /// Symbolic link was created.
    Linked,
    /// Link or rendered file was removed.
    Unlinked,
    /// Rendered file exists but its content differs from the template output.
    Differs,
    /// Template output was written.
    Rendered,
}

impl ActionState {
    /// Upper-case label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Missing => "MISSING",
            Self::Conflict => "CONFLICT",
            Self::Created => "CREATED",
            Self::Linked => "LINKED",
            Self::Unlinked => "UNLINKED",
            Self::Differs => "DIFFERS",
            Self::Rendered => "RENDERED",
        }
    }

    /// Whether this state means the filesystem was modified.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(
            self,
            Self::Created | Self::Linked | Self::Unlinked | Self::Rendered
        )
    }
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of applying one action: its state plus the paths it concerns, as
/// written in the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Resulting state.
    pub state: ActionState,
    /// Directory path, or the link/template source.
    pub primary: PathBuf,
    /// Link/template destination; `None` for directories.
    pub secondary: Option<PathBuf>,
}

impl ActionOutcome {
    /// Outcome for a single-path action.
    #[must_use]
    pub fn single(state: ActionState, primary: impl Into<PathBuf>) -> Self {
        Self {
            state,
            primary: primary.into(),
            secondary: None,
        }
    }

    /// Outcome for a source/destination action.
    #[must_use]
    pub fn pair(
        state: ActionState,
        primary: impl Into<PathBuf>,
        secondary: impl Into<PathBuf>,
    ) -> Self {
        Self {
            state,
            primary: primary.into(),
            secondary: Some(secondary.into()),
        }
    }
}

/// A declarative filesystem effect that can be checked, applied, and reverted.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Run `command` against this resource.
    ///
    /// # Errors
    ///
    /// Returns an error only for conditions that must abort the whole run
    /// (for example [`ActionError`](crate::error::ActionError) variants) or
    /// for unexpected I/O failures. Conflicting filesystem objects are
    /// reported as [`ActionState::Conflict`], not as errors.
    fn apply(&self, command: Command) -> Result<ActionOutcome>;
}
