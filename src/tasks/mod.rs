//! Ordered tasks that apply a profile's actions for one command.
pub mod context;
pub mod directories;
pub mod links;
pub mod templates;

pub use context::Context;

use anyhow::Result;

use crate::resources::{ActionOutcome, ActionState, Command, Resource};

/// A named, executable task.
pub trait Task {
    /// Human-readable task name, used as the report section header.
    fn name(&self) -> &str;

    /// Whether this task has anything to do for the current profile and
    /// command.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error for conditions that abort the whole run: a missing
    /// link source, a broken template, or an unexpected I/O failure.
    fn run(&self, ctx: &Context) -> Result<Vec<ActionOutcome>>;
}

/// Results of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Task name.
    pub name: String,
    /// One outcome per action, in profile order.
    pub outcomes: Vec<ActionOutcome>,
}

/// Results of applying a command to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Name of the profile that was applied.
    pub profile: String,
    /// Command that was applied.
    pub command: Command,
    /// One section per task that ran.
    pub sections: Vec<Section>,
}

impl RunReport {
    /// Whether any action ended in [`ActionState::Conflict`].
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.outcomes)
            .any(|o| o.state == ActionState::Conflict)
    }

    /// Number of actions that changed the filesystem.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.outcomes)
            .filter(|o| o.state.is_change())
            .count()
    }
}

/// The tasks run by `status`, `sync`, and `unlink`, in execution order.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(directories::CreateDirectories),
        Box::new(links::LinkPaths),
        Box::new(templates::RenderTemplates),
    ]
}

/// Execute a task, returning its section or `None` when it does not apply.
///
/// # Errors
///
/// Propagates the task's fatal error.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<Option<Section>> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        return Ok(None);
    }

    ctx.log.debug(&format!("running task: {}", task.name()));
    let outcomes = task.run(ctx)?;
    Ok(Some(Section {
        name: task.name().to_string(),
        outcomes,
    }))
}

/// Run every task for `ctx.command` against `ctx.profile`.
///
/// Conflicts never stop processing; the first fatal error does, leaving
/// already-applied actions in place.
///
/// # Errors
///
/// Returns the first fatal error raised by any action.
pub fn run_actions(ctx: &Context) -> Result<RunReport> {
    let mut sections = Vec::new();
    for task in all_tasks() {
        if let Some(section) = execute(task.as_ref(), ctx)? {
            sections.push(section);
        }
    }
    Ok(RunReport {
        profile: ctx.profile.name.clone(),
        command: ctx.command,
        sections,
    })
}

/// Apply `ctx.command` to each resource in order, logging every decision.
fn apply_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
) -> Result<Vec<ActionOutcome>> {
    resources
        .into_iter()
        .map(|resource| {
            let outcome = resource.apply(ctx.command)?;
            ctx.log
                .debug(&format!("{}: {}", resource.description(), outcome.state));
            Ok(outcome)
        })
        .collect()
}

/// Shared helpers for task unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use crate::config::{MergedProfile, ProfileStore};
    use crate::config::profiles::Profile;
    use crate::logging::Log;
    use crate::resources::Command;

    use super::Context;

    /// Discards every message.
    #[derive(Debug)]
    pub struct NullLog;

    impl Log for NullLog {
        fn stage(&self, _msg: &str) {}
        fn info(&self, _msg: &str) {}
        fn debug(&self, _msg: &str) {}
        fn warn(&self, _msg: &str) {}
        fn error(&self, _msg: &str) {}
    }

    /// Keeps every message as `"<level>: <message>"` for inspection.
    #[derive(Debug, Default)]
    pub struct RecordingLog {
        entries: Mutex<Vec<String>>,
    }

    impl RecordingLog {
        fn record(&self, level: &str, msg: &str) {
            if let Ok(mut guard) = self.entries.lock() {
                guard.push(format!("{level}: {msg}"));
            }
        }

        /// Every recorded entry, in order.
        pub fn entries(&self) -> Vec<String> {
            self.entries.lock().map(|g| g.clone()).unwrap_or_default()
        }

        /// Messages logged at debug level.
        pub fn debug_messages(&self) -> Vec<String> {
            self.entries()
                .iter()
                .filter_map(|e| e.strip_prefix("debug: ").map(String::from))
                .collect()
        }
    }

    impl Log for RecordingLog {
        fn stage(&self, msg: &str) {
            self.record("stage", msg);
        }
        fn info(&self, msg: &str) {
            self.record("info", msg);
        }
        fn debug(&self, msg: &str) {
            self.record("debug", msg);
        }
        fn warn(&self, msg: &str) {
            self.record("warn", msg);
        }
        fn error(&self, msg: &str) {
            self.record("error", msg);
        }
    }

    /// A flattened profile with no entries.
    pub fn empty_profile(name: &str) -> MergedProfile {
        MergedProfile {
            name: name.to_string(),
            ..MergedProfile::default()
        }
    }

    /// Parse a single profile definition and flatten it.
    #[allow(clippy::expect_used)]
    pub fn merged(json: &str) -> MergedProfile {
        let profile = Profile::parse("test", json).expect("valid profile");
        let store = ProfileStore::from_profiles(vec![profile]).expect("valid store");
        store.merged(store.get("test").expect("profile present"))
    }

    /// Context with both home and root set to `dir`.
    pub fn context(profile: MergedProfile, command: Command, dir: &Path) -> Context {
        Context::with_paths(
            profile,
            command,
            Arc::new(NullLog),
            Some(dir.to_path_buf()),
            dir.to_path_buf(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::test_helpers::{RecordingLog, context, merged};
    use super::*;
    use crate::error::ActionError;

    // ------------------------------------------------------------------
    // RunReport
    // ------------------------------------------------------------------

    fn report(states: &[ActionState]) -> RunReport {
        RunReport {
            profile: "p".to_string(),
            command: Command::Status,
            sections: vec![Section {
                name: "Link".to_string(),
                outcomes: states
                    .iter()
                    .map(|s| ActionOutcome::pair(*s, "a", "b"))
                    .collect(),
            }],
        }
    }

    #[test]
    fn conflicts_detected_from_any_outcome() {
        assert!(!report(&[ActionState::Ok, ActionState::Missing]).has_conflicts());
        assert!(report(&[ActionState::Ok, ActionState::Conflict]).has_conflicts());
    }

    #[test]
    fn change_count_counts_mutations() {
        assert_eq!(
            report(&[ActionState::Linked, ActionState::Ok, ActionState::Rendered]).change_count(),
            2
        );
    }

    // ------------------------------------------------------------------
    // run_actions
    // ------------------------------------------------------------------

    #[test]
    fn empty_profile_produces_no_sections() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(merged("{}"), Command::Sync, dir.path());
        let report = run_actions(&ctx).unwrap();
        assert!(report.sections.is_empty());
        assert!(!report.has_conflicts());
        assert_eq!(report.profile, "test");
    }

    #[test]
    fn sections_follow_task_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("src"), "x").unwrap();
        std::fs::write(dir.path().join("tpl"), "y").unwrap();
        let profile = merged(
            r#"{
                "template": [ { "src": "tpl", "dst": "out" } ],
                "link": [ { "src": "src", "dst": "dst" } ],
                "create": [ { "name": "made" } ]
            }"#,
        );
        let report = run_actions(&context(profile, Command::Status, dir.path())).unwrap();
        let names: Vec<&str> = report.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Create", "Link", "Template"]);
    }

    #[test]
    fn unlink_skips_create_section() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("src"), "x").unwrap();
        let profile = merged(
            r#"{
                "create": [ { "name": "made" } ],
                "link": [ { "src": "src", "dst": "dst" } ]
            }"#,
        );
        let report = run_actions(&context(profile, Command::Unlink, dir.path())).unwrap();
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].name, "Link");
    }

    #[test]
    fn conflict_does_not_stop_later_actions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), "a").unwrap();
        std::fs::write(dir.path().join("b"), "b").unwrap();
        std::fs::write(dir.path().join("taken"), "other").unwrap();
        let profile = merged(
            r#"{ "link": [
                { "src": "a", "dst": "taken" },
                { "src": "b", "dst": "free" }
            ] }"#,
        );
        let report = run_actions(&context(profile, Command::Sync, dir.path())).unwrap();
        let states: Vec<ActionState> = report.sections[0].outcomes.iter().map(|o| o.state).collect();
        assert_eq!(states, vec![ActionState::Conflict, ActionState::Linked]);
        assert!(report.has_conflicts());
    }

    #[test]
    fn fatal_error_stops_run_after_earlier_actions() {
        let dir = tempfile::tempdir().unwrap();
        let profile = merged(
            r#"{
                "create": [ { "name": "made" } ],
                "link": [ { "src": "absent", "dst": "dst" } ]
            }"#,
        );
        let err = run_actions(&context(profile, Command::Sync, dir.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ActionError>(),
            Some(ActionError::SourceNotFound { .. })
        ));
        assert!(dir.path().join("made").is_dir());
    }

    #[test]
    fn every_action_is_logged_at_debug() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(RecordingLog::default());
        let ctx = Context::with_paths(
            merged(r#"{ "create": [ { "name": "one" }, { "name": "two" } ] }"#),
            Command::Status,
            log.clone(),
            Some(dir.path().to_path_buf()),
            dir.path().to_path_buf(),
        );
        run_actions(&ctx).unwrap();

        let messages = log.debug_messages();
        assert_eq!(messages.iter().filter(|m| m.ends_with(": MISSING")).count(), 2);
        assert!(messages.iter().any(|m| m == "skipping task: Link (not applicable)"));
    }
}
