//! Command: print version information.
use super::{Line, emit};
use crate::logging::{Log, Palette};

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOTREF_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Log the dotref version.
pub fn run(log: &dyn Log, palette: Palette) {
    emit(log, &[Line::text(format!("dotref {}", palette.hl(version())))]);
}
