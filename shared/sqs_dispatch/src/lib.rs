//! Batched message dispatch to AWS SQS
//!
//! This crate wraps `aws-sdk-sqs` with the block-publish contract the
//! enqueue worker needs: bounded `SendMessageBatch` blocks with per-entry
//! status flags, queue-name resolution, and S3 offload for messages over
//! the queue size limit.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Batch publishing client
pub mod dispatcher;
/// Error types for dispatch operations
pub mod error;
/// Message and configuration types
pub mod types;

pub use dispatcher::{queue_url_for_name, BatchDispatcher, OVERSIZE_ATTRIBUTE};
pub use error::{DispatchError, DispatchResult};
pub use types::{Attribute, DispatchConfig, Message, MAX_BLOCK_COUNT, MAX_MESSAGE_SIZE};
