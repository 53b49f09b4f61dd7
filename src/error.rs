//! Domain-specific error types for dotref.
//!
//! Library code returns these typed errors (directly, or wrapped inside an
//! [`anyhow::Error`] so callers can `downcast_ref` them) while command
//! handlers at the CLI boundary add context and bubble everything up as
//! [`anyhow::Error`].
//!
//! # Error hierarchy
//!
//! ```text
//! ProfileError: loading profile definitions and resolving `extends`
//! ActionError: fatal conditions that abort a status/sync/unlink run
//! StateError: reading or writing the selected-profile state file
//! ```
//!
//! A conflicting filesystem object is *not* an error: it is reported as
//! [`ActionState::Conflict`](crate::resources::ActionState::Conflict).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading profiles into the store.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile file is malformed: bad JSON, a wrong-typed field, or a
    /// missing required field.
    #[error("Failed to load profile \"{profile}\": {message}")]
    Parse {
        /// Name of the profile (file stem) that failed to parse.
        profile: String,
        /// Human-readable description naming the offending field.
        message: String,
    },

    /// A profile extends another profile that does not exist.
    #[error("Profile \"{profile}\" extends \"{parent}\" but it does not exist")]
    MissingReference {
        /// Profile declaring the reference.
        profile: String,
        /// Unknown parent name.
        parent: String,
    },

    /// The `extends` graph contains at least one cycle.
    #[error("Profile inheritance cycle detected between: {}", .profiles.join(", "))]
    Cycle {
        /// Profiles that take part in (or depend on) a cycle, sorted by name.
        profiles: Vec<String>,
    },

    /// A profile file or the profile directory could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Fatal errors that abort an in-progress command.
#[derive(Error, Debug)]
pub enum ActionError {
    /// The source of a link does not exist.
    #[error("The source file or directory to link \"{path}\" does not exist")]
    SourceNotFound {
        /// Source path as written in the profile.
        path: String,
    },

    /// A template references a variable that no profile in the chain defines.
    #[error("Undefined variable {name} in template \"{template}\"")]
    UndefinedVariable {
        /// Name of the undefined variable.
        name: String,
        /// Template source path as written in the profile.
        template: String,
    },

    /// A template contains a `$` that is neither `$$` nor a valid placeholder.
    #[error("Invalid placeholder in template \"{template}\": line {line}, col {column}")]
    InvalidPlaceholder {
        /// Template source path as written in the profile.
        template: String,
        /// 1-based line of the offending `$`.
        line: usize,
        /// 1-based column of the offending `$`.
        column: usize,
    },
}

/// Errors that arise from the selected-profile state file.
#[derive(Error, Debug)]
pub enum StateError {
    /// The state file exists but could not be read or written.
    #[error("IO error accessing state file {path}: {source}")]
    Io {
        /// Path of the state file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The state file content is not a valid state record.
    #[error(
        "Invalid state file {path}: {source} (the current profile name must be a string)"
    )]
    Invalid {
        /// Path of the state file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
