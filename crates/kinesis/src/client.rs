use rusoto_core::{credential::StaticProvider, request::HttpClient, Region};
use rusoto_kinesis::KinesisClient;
use sluice_config::AwsConfig;

use crate::error::Result;
use crate::service::ClientFactory;

pub const AWS_REGION: &str = "us-east-1";

const ACCESS_KEY: &str = "accesskey";
const SECRET_KEY: &str = "secretkey";

/// Scheme used to reach the stream endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
  Http,
  Https,
}

impl Protocol {
  pub fn scheme(&self) -> &'static str {
    match *self {
      Protocol::Http => "http",
      Protocol::Https => "https",
    }
  }
}

// This deployment profile talks plain http to a local endpoint.
const PROTOCOL: Protocol = Protocol::Http;

#[derive(Debug, Clone)]
pub struct KinesisClientFactory {
  config: AwsConfig,
}

impl KinesisClientFactory {
  pub fn new(config: AwsConfig) -> Self {
    KinesisClientFactory { config }
  }

  pub fn from_env() -> Result<Self> {
    Ok(Self::new(AwsConfig::resolve()?))
  }
}

impl ClientFactory for KinesisClientFactory {
  type Client = KinesisClient;

  fn build_client(&self) -> Result<KinesisClient> {
    tracing::info!("creating a kinesis client");
    self.config.check()?;

    let region = match self.config.host {
      Some(ref host) => Region::Custom {
        name: AWS_REGION.to_string(),
        endpoint: format!("{}://{}", PROTOCOL.scheme(), host),
      },
      None => {
        tracing::info!("no endpoint host configured, using the stock {} region", AWS_REGION);
        Region::UsEast1
      }
    };

    let credentials = StaticProvider::new(
      ACCESS_KEY.to_string(),
      SECRET_KEY.to_string(),
      None,
      None,
    );
    let http_client = HttpClient::new()?;

    tracing::info!("building the client");
    Ok(KinesisClient::new_with(http_client, credentials, region))
  }
}
