//! Status, sync, and unlink: apply the current profile's actions.
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, emit, report};
use crate::cli::GlobalOpts;
use crate::logging::{Log, Palette};
use crate::resources::Command;
use crate::tasks::{self, Context, RunReport};

/// Run `command` against the current profile and print the report.
///
/// Conflicts are reported but do not make the command fail.
///
/// # Errors
///
/// Returns an error if no valid profile is selected, or an action hits a
/// fatal condition.
pub fn run(global: &GlobalOpts, command: Command, log: Arc<dyn Log>, palette: Palette) -> Result<()> {
    let setup = CommandSetup::init(global, log.as_ref())?;
    let profile = setup.store.merged(setup.selected()?);
    let ctx = Context::new(profile, command, Arc::clone(&log))?;

    let report = execute(&ctx)?;
    if report.has_conflicts() {
        log.debug("conflicts were detected");
    }
    emit(log.as_ref(), &report::render(&report, palette));
    Ok(())
}

/// Run every task for the context and log a one-line summary.
///
/// # Errors
///
/// Returns the first fatal action error.
pub fn execute(ctx: &Context) -> Result<RunReport> {
    let home = ctx
        .home
        .as_ref()
        .map_or_else(|| "unset".to_string(), |h| h.display().to_string());
    ctx.log.debug(&format!(
        "{} profile {} (home {home}, root {})",
        ctx.command,
        ctx.profile.name,
        ctx.root.display()
    ));
    let report = tasks::run_actions(ctx)?;
    ctx.log
        .debug(&format!("{} change(s) applied", report.change_count()));
    Ok(report)
}
