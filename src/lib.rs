//! Profile-based dotfiles manager.
//!
//! Profiles are JSON files in a dot directory. Each one declares
//! directories to create, paths to link, and templates to render, and may
//! extend other profiles. The selected profile is flattened with its
//! ancestors and applied by one of three commands: `status`, `sync`, or
//! `unlink`.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load profiles, resolve `extends`, persist the selection
//! - **[`resources`]**: idempotent actions classified into [`resources::ActionState`]s
//! - **[`tasks`]**: the ordered `Create`/`Link`/`Template` steps of a run
//! - **[`commands`]**: top-level subcommand orchestration and output
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod tasks;
