//! Leaf assets produced for resolved imports and the factory that builds them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::filter::FilterId;

/// A single file-backed stylesheet discovered through import resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAsset {
  root: PathBuf,
  source_path: PathBuf,
  filters: Vec<FilterId>,
}

impl FileAsset {
  /// Create an asset for `source_path`, relative to the search directory `root`.
  pub fn new(root: impl Into<PathBuf>, source_path: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      source_path: source_path.into(),
      filters: Vec::new(),
    }
  }

  /// Search directory the asset was found in.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Path of the asset relative to its root.
  pub fn source_path(&self) -> &Path {
    &self.source_path
  }

  /// Full path of the asset on disk.
  pub fn path(&self) -> PathBuf {
    self.root.join(&self.source_path)
  }

  /// Directory containing the asset, used as the leading search path for its own imports.
  ///
  /// A bare file name lives in the current directory, so it yields `.` rather than an empty
  /// path that would be dropped from the search path.
  pub fn source_directory(&self) -> PathBuf {
    let path = self.path();
    match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    }
  }

  /// Filters that must process this asset, in registration order.
  pub fn filters(&self) -> &[FilterId] {
    &self.filters
  }

  /// Register `filter` as a required processing step unless it is already present.
  pub fn ensure_filter(&mut self, filter: FilterId) {
    if !self.filters.contains(&filter) {
      self.filters.push(filter);
    }
  }

  /// Read the asset's source text.
  pub fn read_source(&self) -> Result<String> {
    let path = self.path();
    fs::read_to_string(&path)
      .with_context(|| format!("failed to read stylesheet at {}", path.display()))
  }
}

/// Builds leaf assets for a resolved file.
///
/// A single file normally expands to one leaf, but factories may return several (for example
/// when the path names a collection). The resolver only keeps the first leaf.
pub trait AssetFactory {
  /// Create the leaves for `path`, found inside the search directory `root`.
  fn create_asset(&self, path: &Path, root: &Path) -> Result<Vec<FileAsset>>;
}

/// Factory producing exactly one [`FileAsset`] per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAssetFactory;

impl AssetFactory for FileAssetFactory {
  fn create_asset(&self, path: &Path, root: &Path) -> Result<Vec<FileAsset>> {
    let source_path = match path.strip_prefix(root) {
      Ok(relative) => relative,
      Err(_) => path,
    };
    Ok(vec![FileAsset::new(root, source_path)])
  }
}
