//! The batch accumulation and publish loop

use std::time::Instant;

use anyhow::Result;
use sqs_dispatch::{BatchDispatcher, Message, MAX_BLOCK_COUNT};
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::loader;

/// Runs the enqueue loop to completion and returns the number of records
/// published
///
/// # Errors
///
/// Returns an error on any file read failure other than end-of-input, or
/// on a whole-block publish failure. Per-record publish failures are
/// logged and dropped.
pub async fn run(config: &ServiceConfig, dispatcher: &BatchDispatcher) -> Result<u64> {
    let mut count: u64 = 0;
    let mut block: Vec<Message> = Vec::with_capacity(MAX_BLOCK_COUNT);

    loop {
        // Reuse the block allocation across iterations
        block.clear();
        let start = Instant::now();

        let no_more_files = fill_block(config, &mut block, &mut count)?;

        if !block.is_empty() {
            let statuses = dispatcher.put_block(&block).await?;
            for (ix, sent) in statuses.iter().enumerate() {
                if !*sent {
                    warn!("Message {ix} failed to send to outbound queue");
                }
            }

            let sz = block.len();
            let elapsed = start.elapsed().as_secs_f64();
            #[allow(clippy::cast_precision_loss)]
            let tps = sz as f64 / elapsed;
            info!("Processed {sz} messages ({tps:.2} tps)");
        }

        if no_more_files {
            info!("No more files ({count} processed), terminating");
            break;
        }
        if cap_reached(config.max_count, count) {
            info!("Terminating after {count} messages");
            break;
        }
    }

    Ok(count)
}

/// Loads records at successive indices into `block` until the block is
/// full, the record cap is reached, or input runs out. Returns whether
/// end-of-input was seen. The cap is enforced here so the worker never
/// loads, let alone publishes, a record past it.
fn fill_block(config: &ServiceConfig, block: &mut Vec<Message>, count: &mut u64) -> Result<bool> {
    while block.len() < MAX_BLOCK_COUNT && !cap_reached(config.max_count, *count) {
        match loader::load_record(&config.in_dir, *count, config.mode)? {
            Some(message) => {
                block.push(message);
                *count += 1;
            }
            None => return Ok(true),
        }
    }

    Ok(false)
}

const fn cap_reached(max_count: u64, count: u64) -> bool {
    max_count > 0 && count >= max_count
}
