//! Log output setup.
//!
//! The library crates log through the `log` facade. The terminal UI owns
//! stdout and stderr, so records go to a file, and only when one is given.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a file subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(log_file: Option<&Path>, level: &str) -> Result<(), Box<dyn Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    log::info!("logging to {}", path.display());
    Ok(())
}
