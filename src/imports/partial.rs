/// Directory, stem and extension of an import reference.
///
/// References are URL-like strings rather than native paths, so they are always split on
/// forward slashes regardless of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReferenceParts<'a> {
  pub dirname: Option<&'a str>,
  pub stem: &'a str,
  pub extension: Option<&'a str>,
}

impl<'a> ReferenceParts<'a> {
  pub(crate) fn split(reference: &'a str) -> Self {
    let trimmed = reference.trim_end_matches('/');

    let (dirname, basename) = match trimmed.rsplit_once('/') {
      Some(("", basename)) => (Some("/"), basename),
      Some((".", basename)) => (None, basename),
      Some((dirname, basename)) => (Some(dirname), basename),
      None => (None, trimmed),
    };

    let (stem, extension) = match basename.rsplit_once('.') {
      Some((stem, extension)) => (stem, Some(extension)),
      None => (basename, None),
    };

    Self {
      dirname,
      stem,
      extension,
    }
  }

  /// True when the reference names an explicit, non-empty extension.
  pub(crate) fn has_extension(&self) -> bool {
    self.extension.is_some_and(|extension| !extension.is_empty())
  }
}

/// Compute the Sass partial form of an import reference.
///
/// The file stem gains a leading underscore while the directory and any extension are kept:
/// `dir/button.scss` becomes `dir/_button.scss`. Already-partial references are prefixed again.
pub fn partialize(reference: &str) -> String {
  let parts = ReferenceParts::split(reference);

  let mut partial = match parts.dirname {
    None => format!("_{}", parts.stem),
    Some("/") => format!("/_{}", parts.stem),
    Some(dirname) => format!("{dirname}/_{}", parts.stem),
  };

  if let Some(extension) = parts.extension {
    partial.push('.');
    partial.push_str(extension);
  }

  partial
}
