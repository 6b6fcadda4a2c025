use std::{
    fmt,
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
        layer,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const TIMESTAMP: &str = "%H:%M:%S%.3f";

/// SGR code used for a severity.
fn level_sgr(level: Level) -> &'static str {
    match level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

/// Text wrapped in an escape sequence only when the writer supports it.
struct Paint<'a, T> {
    sgr: &'a str,
    enabled: bool,
    value: T,
}

impl<T: fmt::Display> fmt::Display for Paint<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "\x1b[{}m{}\x1b[0m", self.sgr, self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// One line per event: `HH:MM:SS.mmm LEVEL crate::module: fields`.
struct ProjectionFmt;

impl<S, N> FormatEvent<S, N> for ProjectionFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let enabled = writer.has_ansi_escapes();
        let level = *meta.level();

        let stamp = Paint {
            sgr: "2",
            enabled,
            value: Local::now().format(TIMESTAMP),
        };
        let badge = Paint {
            sgr: level_sgr(level),
            enabled,
            value: format!("{level:<5}"),
        };
        write!(writer, "{stamp} {badge} ")?;

        if let Some(module) = meta.module_path() {
            write!(writer, "{module}: ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Sets up the global subscriber. Stdout is left to command output.
///
/// `RUST_LOG` overrides the default `info` filter. When `log_file` is given
/// every record is appended to it without colours; its directory must exist.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = log_file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))
        })
        .transpose()?
        .map(|file| {
            layer()
                .event_format(ProjectionFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    let stderr_layer = layer()
        .event_format(ProjectionFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
