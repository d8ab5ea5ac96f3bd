//! Tracing subscriber setup: console formatter and initialisation.
use std::io::IsTerminal as _;

use tracing_subscriber::EnvFilter;

use super::STAGE_TARGET;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
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

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits mackup-style
/// console output, with or without ANSI colours.
#[derive(Debug, Clone, Copy)]
pub(super) struct MackupFormatter {
    ansi: bool,
}

impl MackupFormatter {
    pub(super) const fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    const fn paint(&self, code: &'static str) -> &'static str {
        if self.ansi { code } else { "" }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for MackupFormatter
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
        let level = *metadata.level();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;
        let reset = self.paint("\x1b[0m");

        match level {
            tracing::Level::ERROR => {
                writeln!(writer, "{}ERROR{reset} {msg}", self.paint("\x1b[31m"))
            }
            tracing::Level::WARN => {
                writeln!(writer, "{}WARN{reset}  {msg}", self.paint("\x1b[33m"))
            }
            tracing::Level::INFO if metadata.target() == STAGE_TARGET => writeln!(
                writer,
                "{}==>{reset} {}{msg}{reset}",
                self.paint("\x1b[1;34m"),
                self.paint("\x1b[1m")
            ),
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}{msg}{reset}", self.paint("\x1b[2m")),
        }
    }
}

/// Console filter: `RUST_LOG` when set, otherwise `debug` with `verbose`
/// and `info` without.
fn console_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Initialise the global [`tracing`] subscriber.
///
/// All events go to stderr so that command output on stdout stays
/// machine-readable. Colours are used only when stderr is a terminal and
/// `NO_COLOR` is unset. Must be called once at program startup.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let console_layer = fmt::layer()
        .event_format(MackupFormatter::new(ansi))
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(console_filter(verbose))
        .with(console_layer)
        .init();
}
