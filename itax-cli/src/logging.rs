use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fmt,
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "warn";

// --- Formatter ---

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Local-time event formatter: timestamp, level, source location, fields.
struct LocalFmt;

/// Strips the crate-relative `src/` prefix from a source path.
fn display_path(file: &str) -> &str {
    file.strip_prefix("src/")
        .or_else(|| file.strip_prefix("src\\"))
        .unwrap_or(file)
}

/// ANSI style for a level label.
fn level_style(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Text wrapped in an ANSI style, or left bare when colour is off.
struct Styled<'a> {
    style: &'static str,
    text: &'a str,
    ansi: bool,
}

impl<'a> Styled<'a> {
    fn new(
        style: &'static str,
        text: &'a str,
        ansi: bool,
    ) -> Self {
        Self { style, text, ansi }
    }
}

impl fmt::Display for Styled<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.ansi {
            write!(f, "{}{}{RESET}", self.style, self.text)
        } else {
            f.write_str(self.text)
        }
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
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
        let ansi = writer.has_ansi_escapes();

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let level = format!("{:>5}", meta.level());
        write!(
            writer,
            "{} {} ",
            Styled::new(DIM, &timestamp, ansi),
            Styled::new(level_style(meta.level()), &level, ansi)
        )?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let location = format!("{}:{line}", display_path(file));
            write!(writer, "{} ", Styled::new(CYAN, &location, ansi))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

/// Builds the global filter.
///
/// `level` wins over `RUST_LOG`; it accepts a bare level ("warn", "debug")
/// or any full `EnvFilter` directive such as `"info,itax_core=debug"`.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Stdout
///   is left for reports.
/// - File: appended to when `log_file` is given, never colored.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
