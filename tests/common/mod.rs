// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace and a fluent builder so
// each integration test can set up profiles and source files without
// repeating filesystem boilerplate.
//
// Layout inside the temporary directory:
// - `dotref/` holds profiles and the state file
// - `home/` stands in for the user's home directory
// - every other relative path resolves against the root itself
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotref::config::{MergedProfile, ProfileStore, StateFile};
use dotref::logging::Log;
use dotref::resources::Command;
use dotref::tasks::{self, Context, RunReport};

/// Name of the state file used by every test workspace.
pub const STATE_FILE: &str = ".dotref.json";

/// Discards every message.
pub struct NullLog;

impl Log for NullLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// An isolated workspace backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory containing the whole workspace.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new workspace with empty `dotref/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("dotref")).expect("create dotref dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self { root }
    }

    /// Path to the workspace root (where relative profile paths resolve).
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the dot directory.
    pub fn dotdir(&self) -> PathBuf {
        self.root.path().join("dotref")
    }

    /// Path to the fake home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Resolve a path relative to the fake home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    /// Resolve a path relative to the workspace root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Load every profile in the dot directory.
    pub fn store(&self) -> ProfileStore {
        ProfileStore::load(&self.dotdir(), STATE_FILE).expect("load profiles")
    }

    /// Load the state file.
    pub fn state(&self) -> StateFile {
        StateFile::load(&self.dotdir().join(STATE_FILE)).expect("load state file")
    }

    /// Flatten the named profile.
    pub fn merged(&self, name: &str) -> MergedProfile {
        let store = self.store();
        let profile = store.get(name).expect("profile exists");
        store.merged(profile)
    }

    /// Build a task context for the selected profile.
    pub fn context(&self, command: Command) -> Context {
        let name = self.state().profile.expect("a profile is selected");
        Context::with_paths(
            self.merged(&name),
            command,
            Arc::new(NullLog),
            Some(self.home()),
            self.root.path().to_path_buf(),
        )
    }

    /// Run `command` against the selected profile.
    pub fn run(&self, command: Command) -> anyhow::Result<RunReport> {
        tasks::run_actions(&self.context(command))
    }

    /// Read a file relative to the fake home directory.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home_path(rel)).expect("read home file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new, empty workspace.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `dotref/<name>.json`.
    pub fn with_profile(self, name: &str, json: &str) -> Self {
        let path = self.ctx.dotdir().join(format!("{name}.json"));
        std::fs::write(path, json).expect("write profile");
        self
    }

    /// Write a file relative to the workspace root, creating parents.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parent");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Write a file relative to the fake home directory, creating parents.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.home_path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home file parent");
        }
        std::fs::write(&path, content).expect("write home file");
        self
    }

    /// Record `name` as the selected profile.
    pub fn selected(self, name: &str) -> Self {
        let mut state = self.ctx.state();
        state.select(name);
        state.save().expect("save state file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
