//! Resolver configuration loaded from JSON or YAML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filter::LoadPaths;

/// File names searched by [`ResolverConfig::discover`], in order.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["sass-deps.json", "sass-deps.yaml", "sass-deps.yml"];

/// Load paths and walk limits for dependency resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// Global load paths searched after each stylesheet's own directory, in priority order.
  pub load_paths: Vec<PathBuf>,
  /// Maximum import depth followed by the transitive walk; unlimited when absent.
  pub max_depth: Option<usize>,
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
  /// Failed to read the configuration file.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse a JSON configuration file.
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Failed to parse a YAML configuration file.
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
}

impl ResolverConfig {
  /// Look for a configuration file in `dir`, falling back to defaults.
  ///
  /// Files that exist but fail to load are logged and skipped.
  pub fn discover(dir: &Path) -> Self {
    for name in DEFAULT_CONFIG_FILES {
      let candidate = dir.join(name);
      if !candidate.is_file() {
        continue;
      }

      match Self::load_from_path(&candidate) {
        Ok(config) => return config,
        Err(err) => warn!("ignoring resolver configuration: {err}"),
      }
    }

    Self::default()
  }

  /// Read configuration from a JSON or YAML file, chosen by extension.
  ///
  /// A missing file yields the defaults. Relative load paths are anchored at the file's
  /// directory.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    let mut config: Self = if is_yaml(path) {
      serde_yaml::from_str(&contents).map_err(|err| ConfigError::Yaml {
        path: path.to_path_buf(),
        source: err,
      })?
    } else {
      serde_json::from_str(&contents).map_err(|err| ConfigError::Json {
        path: path.to_path_buf(),
        source: err,
      })?
    };

    if let Some(base) = path.parent() {
      config.anchor_load_paths(base);
    }

    Ok(config)
  }

  /// Ordered load paths for a resolution pass.
  pub fn load_paths(&self) -> LoadPaths {
    self.load_paths.iter().cloned().collect()
  }

  fn anchor_load_paths(&mut self, base: &Path) {
    for load_path in &mut self.load_paths {
      if load_path.is_relative() {
        *load_path = base.join(&*load_path);
      }
    }
  }
}

fn is_yaml(path: &Path) -> bool {
  matches!(
    path.extension().and_then(|extension| extension.to_str()),
    Some("yaml" | "yml")
  )
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Json { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Yaml { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Json { source, .. } => Some(source),
      Self::Yaml { source, .. } => Some(source),
    }
  }
}
