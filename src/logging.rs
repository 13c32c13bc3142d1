//! Tracing setup for the planner binary.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{PlannerError, Result};

/// How chatty the console output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    #[default]
    Normal,
    /// Everything, with file and line of each event.
    Verbose,
}

impl Verbosity {
    pub fn level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Initialize logging for the given verbosity.
///
/// `RUST_LOG` still overrides the default level. When `log_file` is set,
/// every event is also written there at debug level, and an already
/// installed subscriber is an error instead of a silently unused file.
pub fn init(verbosity: Verbosity, log_file: Option<&Path>) -> Result<()> {
    if let Some(path) = log_file {
        if tracing::dispatcher::has_been_set() {
            return Err(log_file_unused(path));
        }
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.level()));

    let verbose = verbosity == Verbosity::Verbose;
    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .with_filter(filter);

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file))
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let installed = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();

    match (installed, log_file) {
        (Err(_), Some(path)) => Err(log_file_unused(path)),
        _ => Ok(()),
    }
}

fn log_file_unused(path: &Path) -> PlannerError {
    PlannerError::InvalidInput(format!(
        "cannot log to {}: a logger is already installed",
        path.display()
    ))
}

/// Capture everything logged while `f` runs.
#[cfg(test)]
pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    use std::io::{self, Write};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let log = Captured::default();
    let writer = log.clone();
    let subscriber = fmt()
        .with_ansi(false)
        .with_env_filter(EnvFilter::new("debug"))
        .with_writer(move || writer.clone())
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&log.0.lock().unwrap()).into_owned();
    (value, text)
}
