//! Status-line logging for background-correction sessions.
//!
//! The session and replay layers report progress through the `log` facade:
//! which sector a click landed in, the sampled brightness, the sectors still
//! missing, and why a click was ignored. Hosts that do not install their own
//! logger can call [`init_with_level`] to get those lines on stderr as
//! `[elapsed LEVEL] message`. Ignored clicks and failures (`warn` and
//! `error`) also name the module that raised them, e.g.
//! `[  0.004s  WARN] bgcorrect_session::session::machine: ignoring click: ...`.
//!
//! With the `tracing` feature, [`init_tracing`] installs a `tracing`
//! subscriber instead, which also times the instrumented reconstruction and
//! correction spans.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StatusLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StatusLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = status_line(self.started.elapsed().as_secs_f64(), record);
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Render one record; warnings and errors carry their target module.
fn status_line(elapsed: f64, record: &Record) -> String {
    if record.level() <= Level::Warn {
        format!(
            "[{:7.3}s {:>5}] {}: {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        )
    } else {
        format!("[{:7.3}s {:>5}] {}", elapsed, record.level(), record.args())
    }
}

static LOGGER: OnceLock<StatusLogger> = OnceLock::new();

/// Install the status logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StatusLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` fmt subscriber honoring `RUST_LOG` (default `info`).
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
