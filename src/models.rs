//! Data structures produced while resolving stylesheet dependencies.

use std::path::PathBuf;

use serde::Serialize;

use crate::asset::FileAsset;
use crate::filter::FilterId;

/// A stylesheet import resolved to a concrete file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDependency {
  /// Full path of the imported file.
  pub path: PathBuf,
  /// Search directory that satisfied the import.
  pub root: PathBuf,
  /// Filters the imported file must be processed by.
  pub filters: Vec<FilterId>,
}

impl From<&FileAsset> for ResolvedDependency {
  fn from(asset: &FileAsset) -> Self {
    Self {
      path: asset.path(),
      root: asset.root().to_path_buf(),
      filters: asset.filters().to_vec(),
    }
  }
}

/// Direct imports of one stylesheet, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
  /// Stylesheet whose imports were resolved.
  pub parent: PathBuf,
  /// Resolved imports in source order.
  pub children: Vec<ResolvedDependency>,
}

/// Transitive import graph rooted at an entry stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
  /// Stylesheet the walk started from.
  pub entry: PathBuf,
  /// One edge per stylesheet that was read, in depth-first order.
  pub edges: Vec<DependencyEdge>,
  /// Every imported file, once each, in discovery order. The entry is not included.
  pub files: Vec<PathBuf>,
}

impl DependencyGraph {
  /// Paths whose modification should trigger a rebuild of the entry stylesheet.
  pub fn rerun_paths(&self) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(self.files.len() + 1);
    paths.push(self.entry.clone());
    paths.extend(self.files.iter().cloned());
    paths
  }

  /// Serialise the graph as prettified JSON.
  pub fn to_json_pretty(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}
