//! The Sass filter identity and its load-path configuration.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::asset::FileAsset;
use crate::config::ResolverConfig;
use crate::imports::{ResolveContext, resolve_children};

/// Name under which a filter is registered on assets it must process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FilterId(Cow<'static, str>);

impl FilterId {
  /// Identifier used by [`SasscFilter`] unless overridden.
  pub const SASSC: FilterId = FilterId(Cow::Borrowed("sassc"));

  /// Create an identifier from any name.
  pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
    Self(name.into())
  }

  /// Borrow the identifier as a string.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for FilterId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Ordered global load paths, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadPaths(Vec<PathBuf>);

impl LoadPaths {
  /// Create an empty load-path list.
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace every configured path.
  pub fn set<I, P>(&mut self, paths: I)
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.0 = paths.into_iter().map(Into::into).collect();
  }

  /// Append a path with the lowest priority.
  pub fn push(&mut self, path: impl Into<PathBuf>) {
    self.0.push(path.into());
  }

  /// Iterate the paths in priority order.
  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    self.0.iter().map(PathBuf::as_path)
  }

  /// Number of configured paths.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// True when no path is configured.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<P: Into<PathBuf>> FromIterator<P> for LoadPaths {
  fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

/// Dependency side of a `sassc` compilation filter.
///
/// The filter owns its load paths; resolution only borrows them, so a configured filter can be
/// shared between threads resolving independent assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SasscFilter {
  id: FilterId,
  load_paths: LoadPaths,
}

impl SasscFilter {
  /// Create a filter searching `load_paths` after each asset's own directory.
  pub fn new(load_paths: LoadPaths) -> Self {
    Self {
      id: FilterId::SASSC,
      load_paths,
    }
  }

  /// Create a filter from loaded configuration.
  pub fn from_config(config: &ResolverConfig) -> Self {
    Self::new(config.load_paths())
  }

  /// Override the identifier registered on resolved children.
  pub fn with_id(mut self, id: FilterId) -> Self {
    self.id = id;
    self
  }

  /// Identifier registered on resolved children.
  pub fn id(&self) -> &FilterId {
    &self.id
  }

  /// Configured global load paths.
  pub fn load_paths(&self) -> &LoadPaths {
    &self.load_paths
  }

  /// Mutable access to the load paths, for configuration before resolution starts.
  pub fn load_paths_mut(&mut self) -> &mut LoadPaths {
    &mut self.load_paths
  }

  /// Resolve the stylesheets directly imported by `content`.
  ///
  /// `load_path` is searched before the configured paths and is normally the importing
  /// asset's own directory. Every child is tagged with this filter so that the caller can feed
  /// it back in to resolve nested imports.
  pub fn get_children(
    &self,
    context: &ResolveContext<'_>,
    content: &str,
    load_path: Option<&Path>,
  ) -> Result<Vec<FileAsset>> {
    resolve_children(context, &self.id, &self.load_paths, content, load_path)
  }
}

impl Default for SasscFilter {
  fn default() -> Self {
    Self::new(LoadPaths::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_paths_can_be_set_and_appended() {
    let mut paths = LoadPaths::new();
    paths.push("/first");
    paths.set(["/a", "/b"]);
    paths.push("/c");

    let collected: Vec<&Path> = paths.iter().collect();
    assert_eq!(collected, vec![
      Path::new("/a"),
      Path::new("/b"),
      Path::new("/c")
    ]);
  }

  #[test]
  fn filter_uses_sassc_identifier_by_default() {
    let filter = SasscFilter::default();
    assert_eq!(filter.id().as_str(), "sassc");
    assert!(filter.load_paths().is_empty());

    let renamed = filter.with_id(FilterId::new("scss"));
    assert_eq!(renamed.id().to_string(), "scss");
  }

  #[test]
  fn load_paths_are_configurable_before_resolution() {
    let mut filter = SasscFilter::new(["/vendor"].into_iter().collect());
    filter.load_paths_mut().push("/theme");
    assert_eq!(filter.load_paths().len(), 2);
  }
}
