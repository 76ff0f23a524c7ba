//! Tracing setup for a TUI-safe log file.
//!
//! The alternate screen owns stdout, so log output goes to an append-only
//! file instead. Initialization happens at most once per process.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing_subscriber::EnvFilter;

use crate::constants::{APP_BINARY_NAME, TRACE_LOG_ENV};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Location of the trace log, overridable via `SEANCE_TRACE_LOG`.
#[must_use]
pub fn trace_log_path() -> PathBuf {
    env::var(TRACE_LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join(format!("{APP_BINARY_NAME}_trace.log")))
}

/// Initializes the global tracing subscriber writing to the trace log.
///
/// `verbose` lowers the default filter to debug; the `SEANCE_LOG` environment
/// variable overrides either default. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let _ = TRACING_INIT.get_or_init(|| {
        let path = trace_log_path();
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };

        let default_filter = if verbose {
            format!("{APP_BINARY_NAME}=debug")
        } else {
            format!("{APP_BINARY_NAME}=info")
        };
        let filter = EnvFilter::try_from_env("SEANCE_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
