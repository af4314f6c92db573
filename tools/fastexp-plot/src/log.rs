//! Logging setup and stage timing.
//!
//! Three levels controlled by CLI flags:
//! - **Quiet** (`-q`): warnings and errors only
//! - **Default** (no flag): one line per emitted image plus warnings
//! - **Verbose** (`-v`): every loaded file and stage timings

use std::time::Instant;

use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

/// Picks the maximum log level from the verbosity flags.
pub fn level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Initializes the global `tracing` subscriber.
pub fn init(quiet: bool, verbose: bool) {
    FmtSubscriber::builder()
        .with_max_level(level(quiet, verbose))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Drop timer that logs the elapsed duration of a stage at debug level.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled stage.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("{}: {:.1?}", self.label, self.start.elapsed());
    }
}
