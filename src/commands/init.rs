//! Init command: select and persist the current profile.
use anyhow::Result;

use super::{CommandSetup, Line, emit};
use crate::cli::GlobalOpts;
use crate::logging::{Log, Palette};

/// Run the init command.
///
/// # Errors
///
/// Returns an error if `--profile` is missing, the profile does not exist,
/// or the state file cannot be written.
pub fn run(global: &GlobalOpts, log: &dyn Log, palette: Palette) -> Result<()> {
    let mut setup = CommandSetup::init(global, log)?;
    let name = select(&mut setup, global.profile.as_deref())?;
    emit(
        log,
        &[Line::text(format!(
            "Successfully initialized to use profile {}",
            palette.hl(&name)
        ))],
    );
    Ok(())
}

/// Record `profile` as the current profile and persist it.
///
/// # Errors
///
/// Returns an error if `profile` is `None`, unknown, or cannot be saved.
pub fn select(setup: &mut CommandSetup, profile: Option<&str>) -> Result<String> {
    let Some(name) = profile else {
        anyhow::bail!("Please provide a profile name using \"--profile\" argument");
    };
    let name = setup.find(name)?.name.clone();
    setup.state.select(&name);
    setup.state.save()?;
    Ok(name)
}
