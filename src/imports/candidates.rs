use super::partial::{ReferenceParts, partialize};

/// Extensions probed for references that do not name one, in lookup order.
pub const SASS_EXTENSIONS: [&str; 2] = ["scss", "sass"];

/// Generate the ordered file names to probe for an import reference.
///
/// References with an explicit extension yield the reference itself followed by its partial
/// form. Extensionless references yield `.scss` then `.sass` for the plain name, followed by
/// the same pair for the partial name. The order matches Sass's own lookup precedence and is
/// relied on by callers that cache dependency graphs, so it must not change.
pub fn generate_import_candidates(reference: &str) -> Vec<String> {
  let partial = partialize(reference);

  if ReferenceParts::split(reference).has_extension() {
    return vec![reference.to_string(), partial];
  }

  let names = [reference, partial.as_str()];
  names
    .iter()
    .flat_map(|name| {
      SASS_EXTENSIONS
        .iter()
        .map(move |extension| format!("{name}.{extension}"))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::generate_import_candidates;

  #[test]
  fn explicit_extensions_yield_two_candidates() {
    assert_eq!(generate_import_candidates("dir/foo.scss"), vec![
      "dir/foo.scss".to_string(),
      "dir/_foo.scss".to_string(),
    ]);
  }

  #[test]
  fn extensionless_references_yield_four_candidates_in_order() {
    assert_eq!(generate_import_candidates("partials/button"), vec![
      "partials/button.scss".to_string(),
      "partials/button.sass".to_string(),
      "partials/_button.scss".to_string(),
      "partials/_button.sass".to_string(),
    ]);
  }

  #[test]
  fn non_sass_extensions_are_still_explicit() {
    let candidates = generate_import_candidates("print.less");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0], "print.less");
    assert_eq!(candidates[1], "_print.less");
  }

  #[test]
  fn dotted_directories_do_not_count_as_extensions() {
    let candidates = generate_import_candidates("vendor.d/reset");
    assert_eq!(candidates.len(), 4);
    assert_eq!(candidates[2], "vendor.d/_reset.scss");
  }
}
