//! Service configuration
//!
//! All parameters come from command-line flags with environment-variable
//! fallback. A required value that is missing or blank is fatal at
//! startup, before any input is touched.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use crate::loader::InputMode;

/// Bulk-enqueues numbered local payload files to an SQS queue
#[derive(Parser, Debug, Clone)]
#[command(name = "enqueue-worker", version)]
pub struct ServiceConfig {
    /// Output queue name
    #[arg(long, env = "SQS_OUT_QUEUE")]
    pub out_queue: String,

    /// S3 bucket for message payloads too large for direct queue delivery
    #[arg(long, env = "SQS_MESSAGE_BUCKET")]
    pub bucket: String,

    /// Input directory
    #[arg(long, env = "SQS_IN_DIR")]
    pub in_dir: PathBuf,

    /// Maximum number of records to enqueue (0 is all of them)
    #[arg(long = "max", env = "SQS_MAX_COUNT", default_value_t = 0)]
    pub max_count: u64,

    /// Input file convention
    #[arg(long, env = "SQS_INPUT_MODE", value_enum, default_value = "pairs")]
    pub mode: InputMode,
}

impl ServiceConfig {
    /// Parses and validates the configuration, logging the resolved values
    ///
    /// # Errors
    ///
    /// Returns an error if any required value is blank
    pub fn load() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        config.log_resolved();
        Ok(config)
    }

    /// Rejects required values that parsed but are blank
    fn validate(&self) -> Result<()> {
        if self.out_queue.trim().is_empty() {
            bail!("out-queue cannot be blank");
        }
        if self.bucket.trim().is_empty() {
            bail!("bucket cannot be blank");
        }
        if self.in_dir.as_os_str().is_empty() {
            bail!("in-dir cannot be blank");
        }
        Ok(())
    }

    fn log_resolved(&self) {
        info!("[CONFIG] out_queue = [{}]", self.out_queue);
        info!("[CONFIG] bucket    = [{}]", self.bucket);
        info!("[CONFIG] in_dir    = [{}]", self.in_dir.display());
        info!("[CONFIG] max_count = [{}]", self.max_count);
        info!("[CONFIG] mode      = [{:?}]", self.mode);
    }
}
