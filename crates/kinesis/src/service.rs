use async_trait::async_trait;
use rusoto_core::RusotoError;
use rusoto_kinesis::{
  CreateStreamInput, DescribeStreamError, DescribeStreamInput, Kinesis, KinesisClient,
};

use crate::error::Result;

pub const HTTP_OK: u16 = 200;
pub const HTTP_BAD_REQUEST: u16 = 400;
pub const HTTP_NOT_FOUND: u16 = 404;

/// Builds stream service clients. Building must not touch the network.
pub trait ClientFactory: Send + Sync {
  type Client: StreamService + 'static;

  fn build_client(&self) -> Result<Self::Client>;
}

/// The slice of the stream service the provisioner needs.
///
/// Service-level responses are reported as HTTP statuses; only
/// transport-level failures surface as errors.
#[async_trait]
pub trait StreamService: Send + Sync {
  async fn describe_stream(&self, name: &str) -> Result<StreamDescriptor>;

  async fn create_stream(&self, name: &str, shard_count: i64) -> Result<u16>;
}

/// Outcome of a describe call, consumed immediately by the create branch.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
  pub name: String,
  pub exists: bool,
  pub http_status: u16,
}

impl StreamDescriptor {
  pub fn with_status(name: &str, http_status: u16) -> Self {
    StreamDescriptor {
      name: name.to_string(),
      exists: http_status != HTTP_NOT_FOUND,
      http_status,
    }
  }
}

#[async_trait]
impl StreamService for KinesisClient {
  async fn describe_stream(&self, name: &str) -> Result<StreamDescriptor> {
    let input = DescribeStreamInput {
      stream_name: name.to_string(),
      ..Default::default()
    };
    match Kinesis::describe_stream(self, input).await {
      Ok(_) => Ok(StreamDescriptor::with_status(name, HTTP_OK)),
      Err(RusotoError::Service(DescribeStreamError::ResourceNotFound(_))) => {
        Ok(StreamDescriptor::with_status(name, HTTP_NOT_FOUND))
      }
      Err(RusotoError::Service(err)) => {
        tracing::warn!("describe stream {}: {}", name, err);
        Ok(StreamDescriptor::with_status(name, HTTP_BAD_REQUEST))
      }
      Err(RusotoError::Unknown(response)) => {
        tracing::warn!("describe stream {}: status = {}", name, response.status);
        Ok(StreamDescriptor::with_status(name, response.status.as_u16()))
      }
      Err(err) => Err(err.into()),
    }
  }

  async fn create_stream(&self, name: &str, shard_count: i64) -> Result<u16> {
    let input = CreateStreamInput {
      stream_name: name.to_string(),
      shard_count,
    };
    match Kinesis::create_stream(self, input).await {
      Ok(()) => Ok(HTTP_OK),
      Err(RusotoError::Service(err)) => {
        tracing::warn!("create stream {}: {}", name, err);
        Ok(HTTP_BAD_REQUEST)
      }
      Err(RusotoError::Unknown(response)) => Ok(response.status.as_u16()),
      Err(err) => Err(err.into()),
    }
  }
}
