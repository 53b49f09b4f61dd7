//! Tracing subscriber setup: console formatter and initialisation.
use super::logger::STAGE_TARGET;
use super::utils::strip_ansi;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "DOTREF_LOG";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
pub(super) struct MessageExtractor {
    pub(super) message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Render one console line for an event (without the trailing newline).
pub(super) fn format_line(level: tracing::Level, target: &str, msg: &str, colored: bool) -> String {
    let line = match level {
        tracing::Level::ERROR => format!("\x1b[91mError:\x1b[0m {msg}"),
        tracing::Level::WARN => format!("\x1b[93mWarning:\x1b[0m {msg}"),
        tracing::Level::INFO if target == STAGE_TARGET => format!("\x1b[95m{msg}\x1b[0m"),
        tracing::Level::INFO => msg.to_string(),
        _ => format!("\x1b[94m{msg}\x1b[0m"),
    };
    if colored { line } else { strip_ansi(&line) }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits dotref-style
/// console output.
struct DotrefFormatter {
    colored: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for DotrefFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            format_line(
                *metadata.level(),
                metadata.target(),
                &extractor.message,
                self.colored
            )
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout. The level
/// filter comes from `DOTREF_LOG` when set, otherwise `debug` with
/// `verbose` and `info` without. Must be called once at program startup,
/// before any logging.
pub fn init_subscriber(verbose: bool, colored: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(DotrefFormatter { colored })
        .with_writer(make_writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
