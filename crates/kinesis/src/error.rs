use rusoto_core::request::TlsError;
use rusoto_core::RusotoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("config: {0}")]
  Config(#[from] sluice_config::error::Error),
  #[error("http client: {0}")]
  HttpClient(#[from] TlsError),
  #[error("describe stream: {0}")]
  DescribeStream(#[from] RusotoError<rusoto_kinesis::DescribeStreamError>),
  #[error("create stream: {0}")]
  CreateStream(#[from] RusotoError<rusoto_kinesis::CreateStreamError>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
