use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_sqs::error::{BuildError, SdkError};
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::send_message_batch::SendMessageBatchError;
use thiserror::Error;

/// Result type alias for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Error types for dispatch operations
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Error resolving a queue name to its URL
    #[error("Failed to resolve queue URL")]
    GetQueueUrl(#[from] SdkError<GetQueueUrlError>),

    /// Queue URL missing from an otherwise successful lookup
    #[error("No URL returned for queue: {0}")]
    QueueUrlMissing(String),

    /// Error publishing a block to SQS
    #[error("Failed to send message block to SQS")]
    SendBlock(#[from] SdkError<SendMessageBatchError>),

    /// Error storing an oversize payload in S3
    #[error("Failed to store oversize payload in S3")]
    StorePayload(#[from] SdkError<PutObjectError>),

    /// Error assembling a batch entry
    #[error("Failed to build batch entry: {0}")]
    EntryBuild(#[from] BuildError),

    /// Block holds more messages than one batch call accepts
    #[error("Block of {0} messages exceeds the SendMessageBatch entry limit")]
    BlockTooLarge(usize),

    /// Message payload cannot be carried as an SQS message body
    #[error("Message payload is not valid UTF-8: {0}")]
    PayloadNotUtf8(#[from] std::string::FromUtf8Error),
}
