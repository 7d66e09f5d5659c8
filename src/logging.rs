//! Tracing setup
//!
//! The filter comes from `EXPENSE_TRACKER_LOG` (same syntax as `RUST_LOG`),
//! defaulting to warnings from this crate only. Command-line runs log to
//! stderr. The interactive UI owns the terminal, so it logs to a file in the
//! data directory instead.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

const DEFAULT_FILTER: &str = "expense_tracker=warn";

static TRACING_INIT: Once = Once::new();

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber; later calls are ignored
pub fn init_tracing(target: LogTarget) {
    TRACING_INIT.call_once(|| {
        let builder = fmt().with_env_filter(env_filter()).with_target(true);

        match target {
            LogTarget::Stderr => {
                let _ = builder.with_writer(std::io::stderr).try_init();
            }
            LogTarget::File(path) => {
                match OpenOptions::new().create(true).append(true).open(&path) {
                    Ok(file) => {
                        let _ = builder
                            .with_ansi(false)
                            .with_writer(Mutex::new(file))
                            .try_init();
                    }
                    Err(e) => {
                        // Without a log file there is nowhere safe to write while the UI runs
                        eprintln!("Could not open log file {}: {}", path.display(), e);
                    }
                }
            }
        }
    });
}
