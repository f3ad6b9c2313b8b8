use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

pub mod error;

use error::*;

pub const HOST_ENV: &str = "AWS_HOST";
pub const CONFIG_FILE: &str = "sluice.toml";

/// A place the stream endpoint host may come from, checked in order.
#[derive(Debug, Clone)]
pub enum HostSource {
  /// Explicit caller override.
  Value(String),
  /// Environment variable.
  Env(&'static str),
  /// `host` key of the `[aws]` table in a toml file.
  File(PathBuf),
}

impl HostSource {
  fn resolve(&self) -> Result<Option<String>> {
    match *self {
      HostSource::Value(ref value) => Ok(non_empty(value.clone())),
      HostSource::Env(name) => Ok(env::var(name).ok().and_then(non_empty)),
      HostSource::File(ref path) => {
        #[derive(Debug, Deserialize)]
        struct TomlConfig {
          aws: Option<TomlAws>,
        }

        #[derive(Debug, Deserialize)]
        struct TomlAws {
          host: Option<String>,
        }

        let content = match fs::read_to_string(path) {
          Ok(content) => content,
          Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
          Err(err) => return Err(err.into()),
        };
        let config: TomlConfig = toml::from_str(&content)?;
        Ok(config.aws.and_then(|aws| aws.host).and_then(non_empty))
      }
    }
  }
}

fn non_empty(value: String) -> Option<String> {
  if value.is_empty() {
    None
  } else {
    Some(value)
  }
}

#[derive(Debug, Clone, Default)]
pub struct AwsConfig {
  pub host: Option<String>,
  /// Refuse to build a client when no host was resolved.
  pub require_host: bool,
}

impl AwsConfig {
  pub fn resolve() -> Result<Self> {
    Self::resolve_from(&[
      HostSource::Env(HOST_ENV),
      HostSource::File(PathBuf::from(CONFIG_FILE)),
    ])
  }

  /// Evaluates `sources` in order; the first one yielding a non-empty
  /// host wins.
  pub fn resolve_from(sources: &[HostSource]) -> Result<Self> {
    for source in sources {
      if let Some(host) = source.resolve()? {
        tracing::info!("using aws host: {} ({:?})", host, source);
        return Ok(AwsConfig {
          host: Some(host),
          ..Default::default()
        });
      }
    }

    tracing::info!("no aws host resolved from any source");
    Ok(AwsConfig::default())
  }

  pub fn check(&self) -> Result<()> {
    if self.require_host && self.host.is_none() {
      return Err(Error::HostUnresolved);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_source_priority() {
    let config = AwsConfig::resolve_from(&[
      HostSource::Value("first.local".to_string()),
      HostSource::Value("second.local".to_string()),
    ])
    .unwrap();
    assert_eq!(config.host.as_deref(), Some("first.local"));
  }

  #[test]
  fn test_empty_value_falls_through() {
    let config = AwsConfig::resolve_from(&[
      HostSource::Value(String::new()),
      HostSource::Value("fallback.local".to_string()),
    ])
    .unwrap();
    assert_eq!(config.host.as_deref(), Some("fallback.local"));
  }

  #[test]
  fn test_env_source() {
    env::set_var("SLUICE_TEST_AWS_HOST", "env.local");
    let config = AwsConfig::resolve_from(&[HostSource::Env("SLUICE_TEST_AWS_HOST")]).unwrap();
    assert_eq!(config.host.as_deref(), Some("env.local"));
  }

  #[test]
  fn test_unset_env_falls_through() {
    let config = AwsConfig::resolve_from(&[
      HostSource::Env("SLUICE_TEST_AWS_HOST_UNSET"),
      HostSource::Value("fallback.local".to_string()),
    ])
    .unwrap();
    assert_eq!(config.host.as_deref(), Some("fallback.local"));
  }

  #[test]
  fn test_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[aws]\nhost = \"file.local\"\n").unwrap();
    let config = AwsConfig::resolve_from(&[HostSource::File(path)]).unwrap();
    assert_eq!(config.host.as_deref(), Some("file.local"));
  }

  #[test]
  fn test_missing_file_falls_through() {
    let dir = tempfile::tempdir().unwrap();
    let config = AwsConfig::resolve_from(&[
      HostSource::File(dir.path().join("missing.toml")),
      HostSource::Value("fallback.local".to_string()),
    ])
    .unwrap();
    assert_eq!(config.host.as_deref(), Some("fallback.local"));
  }

  #[test]
  fn test_file_without_host_falls_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[aws]\n").unwrap();
    let config = AwsConfig::resolve_from(&[HostSource::File(path)]).unwrap();
    assert_eq!(config.host, None);
  }

  #[test]
  fn test_broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[aws\nhost =").unwrap();
    let result = AwsConfig::resolve_from(&[HostSource::File(path)]);
    assert!(matches!(result, Err(Error::TomlDe(_))));
  }

  #[test]
  fn test_check_requires_host_only_when_strict() {
    assert!(AwsConfig::default().check().is_ok());

    let config = AwsConfig {
      host: None,
      require_host: true,
    };
    assert!(matches!(config.check(), Err(Error::HostUnresolved)));
  }
}
