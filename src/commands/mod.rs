//! Command handlers for the CLI application.
//!
//! - `effect`: effect commands (static, breathing, reactive, wave, ...)
//! - `utility`: utility commands (library-name, save-config)

pub mod effect;
pub mod utility;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chroma_driver::config::LibraryConfig;
use chroma_sdk::{ChromaSdk, NativeLibrary};
use tracing::{info, warn};

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Load the SDK, initialize it, run a closure, then shut it down.
///
/// Shutdown runs even when the closure fails; the closure's error wins.
/// With `hold`, the session stays open until Ctrl-C.
pub fn with_session<F>(library: &LibraryConfig, hold: bool, f: F) -> CommandResult
where
    F: FnOnce(&ChromaSdk<NativeLibrary>) -> CommandResult,
{
    info!("Loading {}", library.target().display());
    let sdk = ChromaSdk::with_library(library.load()?);
    sdk.init()?;

    let result = f(&sdk);

    if hold && result.is_ok() {
        hold_until_interrupted(setup_interrupt_handler());
    }

    match sdk.shutdown() {
        Ok(()) => result,
        Err(e) if result.is_err() => {
            warn!("Shutdown after failed command also failed: {e}");
            result
        }
        Err(e) => Err(e.into()),
    }
}

/// Set up a Ctrl-C handler that sets the given flag to false when triggered.
/// Returns the Arc<AtomicBool> for use in the main loop.
pub fn setup_interrupt_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })?;

    Ok(running)
}

/// Block until the interrupt flag clears.
///
/// Without a handler, Ctrl-C would kill the process before the SDK is
/// released, so the hold is skipped. Returns whether it held.
fn hold_until_interrupted(handler: Result<Arc<AtomicBool>, ctrlc::Error>) -> bool {
    let running = match handler {
        Ok(running) => running,
        Err(e) => {
            warn!("Cannot install Ctrl-C handler, not holding the effect: {e}");
            return false;
        }
    };

    println!("Holding effect, press Ctrl-C to release");
    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));
    }
    true
}
