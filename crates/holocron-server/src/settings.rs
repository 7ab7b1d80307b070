//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file named on
//! the command line (optional), then `HOLOCRON_*` environment variables.
//! Nested keys use `__`, e.g. `HOLOCRON_FAVORITES__VERIFY_REFERENCES=true`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use holocron_core::service::FavoritesPolicy;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Allow any origin, method, and header.
  pub cors_permissive: bool,
  #[serde(default)]
  pub favorites:       FavoritesPolicy,
}

impl ServerConfig {
  /// Defaults only; callers add their own sources.
  pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3000)?
      .set_default("store_path", "holocron.db")?
      .set_default("cors_permissive", true)
  }

  /// Load from defaults, `path` if it exists, and the environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::builder()?
      .add_source(File::from(path).required(false))
      .add_source(
        Environment::with_prefix("HOLOCRON")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  /// The store path with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use config::FileFormat;

  use super::*;

  fn from_toml(toml: &str) -> ServerConfig {
    ServerConfig::builder()
      .unwrap()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = from_toml("");
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("holocron.db"));
    assert!(cfg.cors_permissive);
    assert_eq!(cfg.favorites, FavoritesPolicy::default());
  }

  #[test]
  fn file_overrides_defaults() {
    let cfg = from_toml(
      r#"
        port = 8080
        store_path = "/var/lib/holocron.db"

        [favorites]
        verify_references = true
      "#,
    );
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/holocron.db"));
    assert!(cfg.favorites.verify_references);
    assert!(!cfg.favorites.report_missing_removal);
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml"));
    assert!(cfg.is_ok());
  }

  #[test]
  fn plain_paths_are_left_alone() {
    assert_eq!(expand_tilde(Path::new("data/x.db")), PathBuf::from("data/x.db"));
  }
}
