//! Shared LocalStack setup for dispatch integration tests

#![allow(dead_code)]

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use std::sync::Arc;
use uuid::Uuid;

/// Test context providing clients plus a unique queue and bucket
pub struct DispatchTestContext {
    pub sqs_client: Arc<SqsClient>,
    pub s3_client: Arc<S3Client>,
    pub queue_name: String,
    pub queue_url: String,
    pub bucket_name: String,
}

impl DispatchTestContext {
    /// Creates a new test context with a unique queue and bucket
    pub async fn new(test_name: &str) -> Self {
        // Setup LocalStack clients with hardcoded credentials for CI
        let credentials = Credentials::from_keys(
            "test", // AWS_ACCESS_KEY_ID
            "test", // AWS_SECRET_ACCESS_KEY
            None,   // no session token
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url("http://localhost:4566")
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .load()
            .await;

        let sqs_client = Arc::new(SqsClient::new(&config));

        // Override "force path style" to true for compatibility with LocalStack
        let s3_config: aws_sdk_s3::Config = (&config).into();
        let mut builder = s3_config.to_builder();
        builder.set_force_path_style(Some(true));
        let s3_client = Arc::new(S3Client::from_conf(builder.build()));

        let queue_name = format!("{}-{}", test_name, Uuid::new_v4());
        let result = sqs_client
            .create_queue()
            .queue_name(&queue_name)
            .send()
            .await
            .expect("Failed to create test queue");
        let queue_url = result
            .queue_url()
            .expect("Queue URL not returned")
            .to_string();

        let bucket_name = format!("{}-{}", test_name, Uuid::new_v4());
        s3_client
            .create_bucket()
            .bucket(&bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");

        Self {
            sqs_client,
            s3_client,
            queue_name,
            queue_url,
            bucket_name,
        }
    }

    /// Receives up to `expected` messages, polling a bounded number of times
    pub async fn drain(&self, expected: usize) -> Vec<aws_sdk_sqs::types::Message> {
        let mut received = Vec::new();
        for _ in 0..10 {
            if received.len() >= expected {
                break;
            }
            let result = self
                .sqs_client
                .receive_message()
                .queue_url(&self.queue_url)
                .max_number_of_messages(10)
                .message_attribute_names("All")
                .send()
                .await
                .expect("Failed to receive messages");
            received.extend(result.messages().iter().cloned());
        }
        received
    }
}

impl Drop for DispatchTestContext {
    fn drop(&mut self) {
        // Clean up the queue
        let client = self.sqs_client.clone();
        let queue_url = self.queue_url.clone();

        // Use tokio runtime to delete queue
        let handle = tokio::runtime::Handle::try_current();
        if let Ok(handle) = handle {
            handle.spawn(async move {
                let _ = client.delete_queue().queue_url(&queue_url).send().await;
            });
        }
    }
}
