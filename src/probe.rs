//! File existence checks used while probing import candidates.

use std::io;
use std::path::Path;

/// Answers whether a candidate path exists.
///
/// A missing file is `Ok(false)`. Errors are reserved for failures to determine existence at all
/// (for example a permission error on a parent directory) and abort resolution.
pub trait FileProbe {
  /// Query whether `path` exists.
  fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// Uncached filesystem probe; every call hits the disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl FileProbe for DiskProbe {
  fn exists(&self, path: &Path) -> io::Result<bool> {
    path.try_exists()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn reports_existing_and_missing_files() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("_button.scss");
    std::fs::write(&file, "").unwrap();

    assert!(DiskProbe.exists(&file).unwrap());
    assert!(!DiskProbe.exists(&dir.path().join("missing.scss")).unwrap());
  }
}
