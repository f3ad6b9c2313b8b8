use std::sync::Arc;
use tokio::sync::Mutex;

use crate::client::KinesisClientFactory;
use crate::error::Result;
use crate::service::{ClientFactory, StreamService, HTTP_OK};

pub const DEFAULT_SHARD_COUNT: i64 = 1;

/// Hands out a shared stream service client, creating the backing stream
/// on first use if it does not exist yet.
///
/// The client is built once; every later `get_client` call returns the
/// same `Arc`. The existence check runs only as part of that first
/// construction.
pub struct StreamProvisioner<F: ClientFactory> {
  factory: F,
  stream_name: String,
  shard_count: i64,
  client: Mutex<Option<Arc<F::Client>>>,
}

pub type KinesisProvisioner = StreamProvisioner<KinesisClientFactory>;

impl<F: ClientFactory> StreamProvisioner<F> {
  pub fn new(factory: F, stream_name: impl Into<String>) -> Self {
    StreamProvisioner {
      factory,
      stream_name: stream_name.into(),
      shard_count: DEFAULT_SHARD_COUNT,
      client: Mutex::new(None),
    }
  }

  pub fn with_shard_count(mut self, shard_count: i64) -> Self {
    self.shard_count = shard_count;
    self
  }

  pub fn stream_name(&self) -> &str {
    &self.stream_name
  }

  /// Returns the shared client, building and provisioning it on first
  /// call.
  ///
  /// A failed creation attempt is logged and the client is returned
  /// anyway; stream operations on it will surface the problem. Transport
  /// failures during the existence check propagate, but the built client
  /// stays cached, so later calls return it without re-running the
  /// check.
  pub async fn get_client(&self) -> Result<Arc<F::Client>> {
    let mut guard = self.client.lock().await;
    if let Some(ref client) = *guard {
      return Ok(client.clone());
    }

    let client = Arc::new(self.factory.build_client()?);
    *guard = Some(client.clone());
    self.ensure_stream(&client).await?;
    Ok(client)
  }

  async fn ensure_stream(&self, client: &F::Client) -> Result<()> {
    tracing::info!("checking that the stream {} exists", self.stream_name);
    let descriptor = client.describe_stream(&self.stream_name).await?;
    tracing::debug!(
      "describe stream {}: status = {}",
      descriptor.name,
      descriptor.http_status
    );

    if descriptor.exists {
      tracing::info!("the stream already exists, skipping auto-creation");
      return Ok(());
    }

    tracing::info!("the stream does not exist, auto creating it");
    let status = client
      .create_stream(&self.stream_name, self.shard_count)
      .await?;
    if status == HTTP_OK {
      tracing::info!("stream created");
    } else {
      tracing::error!("failed to create the stream: status = {}", status);
    }
    Ok(())
  }
}
