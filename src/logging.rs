//! Tracing setup.
//!
//! The terminal is owned by the UI, so log output goes to a file. The level
//! defaults to `info` and can be changed with `RUST_LOG`, e.g.
//! `RUST_LOG=itv=trace itv data.json`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::ITVError;

pub fn init(log_file: &Path) -> Result<(), ITVError> {
    let file = File::create(log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| ITVError::LoggingFailed(e.to_string()))
}
