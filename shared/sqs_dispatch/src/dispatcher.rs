//! Batched SQS publishing
//!
//! One `SendMessageBatch` call per block, per-entry status flags matched
//! back to block positions, and S3 offload for messages the queue would
//! reject as too large.

use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::types::{MessageAttributeValue, SendMessageBatchRequestEntry};
use aws_sdk_sqs::Client as SqsClient;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DispatchError, DispatchResult};
use crate::types::{DispatchConfig, Message, MAX_BLOCK_COUNT, MAX_MESSAGE_SIZE};

/// Attribute appended to messages whose payload was moved to S3. Its value
/// is the bucket holding the payload; the message body is the object key.
pub const OVERSIZE_ATTRIBUTE: &str = "x-dispatch-payload-in-s3";

/// Resolves a queue name to its URL
///
/// # Errors
///
/// Returns `DispatchError` if the lookup fails or returns no URL
pub async fn queue_url_for_name(client: &SqsClient, queue_name: &str) -> DispatchResult<String> {
    let result = client
        .get_queue_url()
        .queue_name(queue_name)
        .send()
        .await?;

    result
        .queue_url()
        .map(ToString::to_string)
        .ok_or_else(|| DispatchError::QueueUrlMissing(queue_name.to_string()))
}

/// Batch publisher for an SQS queue
pub struct BatchDispatcher {
    sqs_client: Arc<SqsClient>,
    s3_client: Arc<S3Client>,
    config: DispatchConfig,
}

impl BatchDispatcher {
    /// Creates a new dispatcher
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `s3_client` - Pre-configured S3 client for oversize payloads
    /// * `config` - Queue URL and oversize bucket
    #[must_use]
    pub const fn new(
        sqs_client: Arc<SqsClient>,
        s3_client: Arc<S3Client>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            sqs_client,
            s3_client,
            config,
        }
    }

    /// Publishes a block of messages in one `SendMessageBatch` call
    ///
    /// Messages over the SQS size limit have their payload stored in the
    /// configured bucket first; the body sent to the queue is the object
    /// key and `OVERSIZE_ATTRIBUTE` marks the indirection.
    ///
    /// # Returns
    ///
    /// One flag per message, in block order: `true` if the queue accepted
    /// the entry
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the block exceeds the batch limit, a
    /// payload is not valid UTF-8, the S3 offload fails, or the batch call
    /// itself fails
    pub async fn put_block(&self, block: &[Message]) -> DispatchResult<Vec<bool>> {
        if block.len() > MAX_BLOCK_COUNT {
            return Err(DispatchError::BlockTooLarge(block.len()));
        }
        if block.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::with_capacity(block.len());
        for (ix, message) in block.iter().enumerate() {
            entries.push(self.build_entry(ix, message).await?);
        }

        let result = self
            .sqs_client
            .send_message_batch()
            .queue_url(&self.config.queue_url)
            .set_entries(Some(entries))
            .send()
            .await?;

        // Per-entry results come back keyed by entry id, not in block order
        let mut statuses = vec![false; block.len()];
        for entry in result.successful() {
            if let Ok(ix) = entry.id().parse::<usize>() {
                if let Some(status) = statuses.get_mut(ix) {
                    *status = true;
                }
            }
        }
        for entry in result.failed() {
            debug!(
                "Queue rejected entry {}: {} ({})",
                entry.id(),
                entry.code(),
                entry.message().unwrap_or("no detail")
            );
        }

        Ok(statuses)
    }

    async fn build_entry(
        &self,
        ix: usize,
        message: &Message,
    ) -> DispatchResult<SendMessageBatchRequestEntry> {
        let oversize = message.size() > MAX_MESSAGE_SIZE;
        let body = if oversize {
            self.offload_payload(message).await?
        } else {
            String::from_utf8(message.payload.clone())?
        };

        let mut builder = SendMessageBatchRequestEntry::builder()
            .id(ix.to_string())
            .message_body(body);
        for attribute in &message.attributes {
            builder = builder.message_attributes(
                &attribute.name,
                MessageAttributeValue::builder()
                    .data_type("String")
                    .string_value(&attribute.value)
                    .build()?,
            );
        }
        if oversize {
            builder = builder.message_attributes(
                OVERSIZE_ATTRIBUTE,
                MessageAttributeValue::builder()
                    .data_type("String")
                    .string_value(&self.config.oversize_bucket)
                    .build()?,
            );
        }

        Ok(builder.build()?)
    }

    /// Stores an oversize payload in the bucket and returns the object key
    async fn offload_payload(&self, message: &Message) -> DispatchResult<String> {
        let key = Uuid::new_v4().to_string();
        debug!(
            "Payload of {} bytes exceeds the message size limit, storing in s3://{}/{}",
            message.payload.len(),
            self.config.oversize_bucket,
            key
        );

        self.s3_client
            .put_object()
            .bucket(&self.config.oversize_bucket)
            .key(&key)
            .body(ByteStream::from(message.payload.clone()))
            .send()
            .await?;

        Ok(key)
    }
}
