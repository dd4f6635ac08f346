use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};

use super::candidates::generate_import_candidates;
use super::extract::{CssImportExtractor, ImportExtractor};
use super::filters::is_plain_css_import;
use crate::asset::{AssetFactory, FileAsset, FileAssetFactory};
use crate::filter::{FilterId, LoadPaths};
use crate::probe::{DiskProbe, FileProbe};

/// Collaborators consulted while resolving imports.
///
/// Every collaborator is `Sync`, so one context can serve concurrent resolutions of
/// independent assets.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
  /// Builds leaf assets for matched files.
  pub factory: &'a (dyn AssetFactory + Sync),
  /// Answers existence queries for candidate paths.
  pub probe: &'a (dyn FileProbe + Sync),
  /// Produces the raw import references of a stylesheet.
  pub extractor: &'a (dyn ImportExtractor + Sync),
}

impl<'a> ResolveContext<'a> {
  /// Assemble a context from explicit collaborators.
  pub fn new(
    factory: &'a (dyn AssetFactory + Sync),
    probe: &'a (dyn FileProbe + Sync),
    extractor: &'a (dyn ImportExtractor + Sync),
  ) -> Self {
    Self {
      factory,
      probe,
      extractor,
    }
  }
}

impl ResolveContext<'static> {
  /// Context backed by the real filesystem and the regex extractor.
  pub fn disk() -> Self {
    Self::new(&FileAssetFactory, &DiskProbe, &CssImportExtractor)
  }
}

impl Default for ResolveContext<'static> {
  fn default() -> Self {
    Self::disk()
  }
}

/// Directories probed for one resolution pass, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath<'a> {
  directories: Vec<&'a Path>,
}

impl<'a> SearchPath<'a> {
  /// Place `leading` (when present and non-empty) ahead of the configured load paths.
  pub fn new(leading: Option<&'a Path>, load_paths: &'a LoadPaths) -> Self {
    let leading = leading.filter(|path| !path.as_os_str().is_empty());
    let directories = leading.into_iter().chain(load_paths.iter()).collect();
    Self { directories }
  }

  /// Iterate the directories in priority order.
  pub fn iter(&self) -> impl Iterator<Item = &'a Path> + '_ {
    self.directories.iter().copied()
  }

  /// Number of directories in the search path.
  pub fn len(&self) -> usize {
    self.directories.len()
  }

  /// True when there is nothing to search.
  pub fn is_empty(&self) -> bool {
    self.directories.is_empty()
  }
}

/// Resolve one import reference against the search path.
///
/// Directories are walked in priority order and, within each directory, candidates in
/// priority order. The first existing file whose factory output is non-empty wins: its first
/// leaf is tagged with `filter` and returned. Plain CSS imports, empty references and
/// references matching nothing resolve to `None`; only probe or factory failures are errors.
pub fn resolve_import(
  context: &ResolveContext<'_>,
  filter: &FilterId,
  search_path: &SearchPath<'_>,
  reference: &str,
) -> Result<Option<FileAsset>> {
  if reference.is_empty() {
    return Ok(None);
  }

  if is_plain_css_import(reference) {
    trace!(reference, "skipping plain css import");
    return Ok(None);
  }

  let candidates = generate_import_candidates(reference);

  for directory in search_path.iter() {
    for candidate in &candidates {
      let file = candidate_path(directory, candidate);
      let exists = context
        .probe
        .exists(&file)
        .with_context(|| format!("failed to check whether {} exists", file.display()))?;
      if !exists {
        continue;
      }

      let leaves = context
        .factory
        .create_asset(&file, directory)
        .with_context(|| format!("failed to create asset for {}", file.display()))?;

      if let Some(mut leaf) = leaves.into_iter().next() {
        leaf.ensure_filter(filter.clone());
        trace!(reference, path = %file.display(), "resolved stylesheet import");
        return Ok(Some(leaf));
      }
    }
  }

  debug!(
    reference,
    directories = search_path.len(),
    "stylesheet import did not resolve"
  );
  Ok(None)
}

/// Resolve every import of `content`, in order of appearance.
///
/// The search path is `leading` followed by `load_paths`. When both are empty the extractor is
/// never invoked. References resolving to the same file each produce an entry.
pub fn resolve_children(
  context: &ResolveContext<'_>,
  filter: &FilterId,
  load_paths: &LoadPaths,
  content: &str,
  leading: Option<&Path>,
) -> Result<Vec<FileAsset>> {
  let search_path = SearchPath::new(leading, load_paths);
  if search_path.is_empty() {
    return Ok(Vec::new());
  }

  let mut children = Vec::new();
  for reference in context.extractor.extract(content) {
    if let Some(child) = resolve_import(context, filter, &search_path, &reference)? {
      children.push(child);
    }
  }

  Ok(children)
}

// A leading slash would make `join` discard the directory; the candidate stays under it.
fn candidate_path(directory: &Path, candidate: &str) -> PathBuf {
  directory.join(candidate.trim_start_matches('/'))
}
