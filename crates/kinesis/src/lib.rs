pub mod error;

mod client;
mod provision;
mod service;

pub use client::{KinesisClientFactory, Protocol, AWS_REGION};
pub use provision::{KinesisProvisioner, StreamProvisioner, DEFAULT_SHARD_COUNT};
pub use service::{
  ClientFactory, StreamDescriptor, StreamService, HTTP_BAD_REQUEST, HTTP_NOT_FOUND, HTTP_OK,
};
