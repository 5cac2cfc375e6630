//! Command implementations for the NFL analytics CLI

pub mod common;
pub mod extract;
pub mod inspect;
pub mod query;
pub mod rankings;


use crate::config::Config;
use crate::error::{NflError, Result};

/// Worker count from the command line, falling back to the configured
/// default. Zero workers is rejected.
pub fn resolve_workers(workers: Option<usize>, config: &Config) -> Result<usize> {
    match workers {
        Some(0) => Err(NflError::Config {
            message: "--workers must be at least 1".to_string(),
        }),
        Some(n) => Ok(n),
        None => Ok(config.max_workers),
    }
}
