use std::sync::Arc;

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use enqueue_worker::config::ServiceConfig;
use enqueue_worker::enqueuer;
use sqs_dispatch::{queue_url_for_name, BatchDispatcher, DispatchConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting enqueue worker");

    // Any configuration problem is fatal before any input is touched
    let config = ServiceConfig::load()?;

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let sqs_client = Arc::new(SqsClient::new(&aws_config));
    let s3_client = Arc::new(S3Client::new(&aws_config));

    let queue_url = queue_url_for_name(&sqs_client, &config.out_queue).await?;
    let dispatcher = BatchDispatcher::new(
        sqs_client,
        s3_client,
        DispatchConfig {
            queue_url,
            oversize_bucket: config.bucket.clone(),
        },
    );

    enqueuer::run(&config, &dispatcher).await?;

    Ok(())
}
