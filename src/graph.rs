//! Transitive dependency walk over a stylesheet's imports.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::asset::FileAsset;
use crate::filter::SasscFilter;
use crate::imports::ResolveContext;
use crate::models::{DependencyEdge, DependencyGraph, ResolvedDependency};

/// Resolve every stylesheet reachable from `entry` through imports.
///
/// Each file is searched with its own directory ahead of the filter's load paths. Files are
/// identified by canonical path, so import cycles and files reached through different
/// spellings are read once. `max_depth` bounds how many import levels are followed. Failing to
/// read any reached file aborts the walk, since a partial graph would leave stale caches.
pub fn collect_dependency_graph(
  context: &ResolveContext<'_>,
  filter: &SasscFilter,
  entry: &Path,
  max_depth: Option<usize>,
) -> Result<DependencyGraph> {
  let mut walker = GraphWalker {
    context,
    filter,
    max_depth,
    visited: HashSet::new(),
    edges: Vec::new(),
    files: Vec::new(),
  };

  let entry_asset = FileAsset::new("", entry);
  walker.mark_visited(&entry_asset.path())?;
  walker.walk(&entry_asset, 0)?;

  debug!(
    entry = %entry.display(),
    files = walker.files.len(),
    "collected stylesheet dependencies"
  );

  Ok(DependencyGraph {
    entry: entry.to_path_buf(),
    edges: walker.edges,
    files: walker.files,
  })
}

struct GraphWalker<'a> {
  context: &'a ResolveContext<'a>,
  filter: &'a SasscFilter,
  max_depth: Option<usize>,
  visited: HashSet<PathBuf>,
  edges: Vec<DependencyEdge>,
  files: Vec<PathBuf>,
}

impl GraphWalker<'_> {
  fn walk(&mut self, asset: &FileAsset, depth: usize) -> Result<()> {
    if self.max_depth.is_some_and(|max| depth >= max) {
      return Ok(());
    }

    let source = asset.read_source()?;
    let directory = asset.source_directory();
    let children = self
      .filter
      .get_children(self.context, &source, Some(&directory))?;

    self.edges.push(DependencyEdge {
      parent: asset.path(),
      children: children.iter().map(ResolvedDependency::from).collect(),
    });

    for child in &children {
      let child_path = child.path();
      if self.mark_visited(&child_path)? {
        self.files.push(child_path);
        self.walk(child, depth + 1)?;
      }
    }

    Ok(())
  }

  /// Returns `true` the first time a file is seen.
  fn mark_visited(&mut self, path: &Path) -> Result<bool> {
    let canonical = fs::canonicalize(path)
      .with_context(|| format!("failed to resolve {}", path.display()))?;
    Ok(self.visited.insert(canonical))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::filter::LoadPaths;
  use tempfile::{TempDir, tempdir};

  struct Fixture {
    root: TempDir,
    vendor: TempDir,
  }

  impl Fixture {
    fn new() -> Self {
      let fixture = Self {
        root: tempdir().unwrap(),
        vendor: tempdir().unwrap(),
      };
      fixture.write_root(
        "main.scss",
        r#"@import "base"; @import "components/button"; @import "print.css";"#,
      );
      fixture.write_root("_base.scss", r#"@import "mixins";"#);
      fixture.write_root(
        "components/_button.scss",
        r#"@import "../base"; @import "mixins";"#,
      );
      fs::write(fixture.vendor.path().join("_mixins.scss"), "").unwrap();
      fixture
    }

    fn write_root(&self, relative: &str, content: &str) {
      let path = self.root.path().join(relative);
      fs::create_dir_all(path.parent().unwrap()).unwrap();
      fs::write(path, content).unwrap();
    }

    fn filter(&self) -> SasscFilter {
      let load_paths: LoadPaths = [self.vendor.path()].into_iter().collect();
      SasscFilter::new(load_paths)
    }

    fn entry(&self) -> PathBuf {
      self.root.path().join("main.scss")
    }
  }

  #[test]
  fn walks_imports_transitively_once_per_file() {
    let fixture = Fixture::new();
    let graph = collect_dependency_graph(
      &ResolveContext::disk(),
      &fixture.filter(),
      &fixture.entry(),
      None,
    )
    .unwrap();

    assert_eq!(graph.files, vec![
      fixture.root.path().join("_base.scss"),
      fixture.vendor.path().join("_mixins.scss"),
      fixture.root.path().join("components/_button.scss"),
    ]);
    assert_eq!(graph.edges.len(), 4);
    assert_eq!(graph.edges[0].children.len(), 2);

    let button_edge = &graph.edges[3];
    assert_eq!(
      button_edge.parent,
      fixture.root.path().join("components/_button.scss")
    );
    assert_eq!(button_edge.children.len(), 2);
    assert_eq!(
      button_edge.children[0].root,
      fixture.root.path().join("components")
    );
    assert_eq!(button_edge.children[1].root, fixture.vendor.path());
  }

  #[test]
  fn limits_walk_depth() {
    let fixture = Fixture::new();
    let graph = collect_dependency_graph(
      &ResolveContext::disk(),
      &fixture.filter(),
      &fixture.entry(),
      Some(1),
    )
    .unwrap();

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.files.len(), 2);
    assert_eq!(graph.rerun_paths()[0], fixture.entry());
  }

  #[test]
  fn tolerates_import_cycles() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.scss"), r#"@import "b";"#).unwrap();
    fs::write(dir.path().join("b.scss"), r#"@import "a";"#).unwrap();

    let graph = collect_dependency_graph(
      &ResolveContext::disk(),
      &SasscFilter::default(),
      &dir.path().join("a.scss"),
      None,
    )
    .unwrap();

    assert_eq!(graph.files, vec![dir.path().join("b.scss")]);
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.edges[1].children[0].path, dir.path().join("a.scss"));
  }

  struct CurrentDirGuard(PathBuf);

  impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
      std::env::set_current_dir(&self.0).unwrap();
    }
  }

  // The only test that changes the working directory; every other test uses absolute paths.
  #[test]
  fn relative_entry_searches_the_current_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.scss"), r#"@import "base";"#).unwrap();
    fs::write(dir.path().join("_base.scss"), "").unwrap();

    let _guard = CurrentDirGuard(std::env::current_dir().unwrap());
    std::env::set_current_dir(dir.path()).unwrap();

    let graph = collect_dependency_graph(
      &ResolveContext::disk(),
      &SasscFilter::default(),
      Path::new("main.scss"),
      None,
    )
    .unwrap();

    assert_eq!(graph.files, vec![PathBuf::from("./_base.scss")]);
    assert_eq!(graph.edges[0].parent, PathBuf::from("main.scss"));
    assert_eq!(graph.edges[0].children[0].root, PathBuf::from("."));
  }

  #[test]
  fn wide_graphs_do_not_hold_files_open() {
    let dir = tempdir().unwrap();
    let count = 2048;
    let mut main = String::new();
    for index in 0..count {
      fs::write(dir.path().join(format!("_part{index}.scss")), "").unwrap();
      main.push_str(&format!("@import \"part{index}\";\n"));
    }
    fs::write(dir.path().join("main.scss"), main).unwrap();

    let graph = collect_dependency_graph(
      &ResolveContext::disk(),
      &SasscFilter::default(),
      &dir.path().join("main.scss"),
      None,
    )
    .unwrap();

    assert_eq!(graph.files.len(), count);
    assert_eq!(graph.edges.len(), count + 1);
  }

  #[test]
  fn missing_entry_is_an_error() {
    let dir = tempdir().unwrap();
    let result = collect_dependency_graph(
      &ResolveContext::disk(),
      &SasscFilter::default(),
      &dir.path().join("absent.scss"),
      None,
    );

    assert!(result.is_err());
  }
}
