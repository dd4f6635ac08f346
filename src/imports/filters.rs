/// Determine whether an import reference is a plain CSS import.
///
/// Sass leaves `@import "x.css"` in the output untouched instead of inlining the file, so such
/// references never become dependencies. The check is a case-sensitive suffix match.
pub fn is_plain_css_import(reference: &str) -> bool {
  reference.ends_with(".css")
}
