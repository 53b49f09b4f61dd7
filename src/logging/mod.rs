//! Logging infrastructure for structured console output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::{Logger, STAGE_TARGET};
pub use subscriber::{LOG_ENV, init_subscriber};
pub use types::Log;
pub use utils::{Palette, colors_enabled, strip_ansi};
