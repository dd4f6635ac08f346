use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Source of raw import references for a stylesheet.
///
/// Implementations return every import target in order of appearance. The resolver treats the
/// result as authoritative and performs no parsing of its own.
pub trait ImportExtractor {
  /// Extract the literal import targets from stylesheet source text.
  fn extract(&self, source: &str) -> Vec<String>;
}

impl<F> ImportExtractor for F
where
  F: Fn(&str) -> Vec<String>,
{
  fn extract(&self, source: &str) -> Vec<String> {
    self(source)
  }
}

/// Regex based extractor for `@import` statements in SCSS, Sass and CSS sources.
///
/// Comments are stripped first. Every quoted or `url(...)` target of a statement is returned,
/// including comma separated lists; a statement without quoted targets falls back to bare
/// names as written in the indented syntax. Empty targets and repeated literals are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssImportExtractor;

impl ImportExtractor for CssImportExtractor {
  fn extract(&self, source: &str) -> Vec<String> {
    extract_import_references(source)
  }
}

struct ImportPatterns {
  statement: Regex,
  target: Regex,
}

fn import_patterns() -> &'static ImportPatterns {
  static PATTERNS: OnceLock<ImportPatterns> = OnceLock::new();
  PATTERNS.get_or_init(|| ImportPatterns {
    statement: Regex::new(r"@import[ \t]+((?:[^;{}\n,]*,\s*)*[^;{}\n]*)")
      .expect("invalid import statement regex"),
    target: Regex::new(
      r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^)'"\s]*))\s*\)|"([^"]*)"|'([^']*)'"#,
    )
    .expect("invalid import target regex"),
  })
}

/// Extract import references from stylesheet source using [`CssImportExtractor`] rules.
pub fn extract_import_references(source: &str) -> Vec<String> {
  let patterns = import_patterns();
  let content = strip_comments(source);

  let mut seen = BTreeSet::new();
  let mut references = Vec::new();

  for statement in patterns.statement.captures_iter(&content) {
    let Some(body) = statement.get(1).map(|m| m.as_str()) else {
      continue;
    };

    for target in statement_targets(patterns, body) {
      if !target.is_empty() && seen.insert(target.to_string()) {
        references.push(target.to_string());
      }
    }
  }

  references
}

/// Remove `/* */` and `//` comments, leaving quoted strings and `url(...)` bodies intact.
///
/// Line comments stop before the newline so that indented-syntax statements stay separated.
fn strip_comments(source: &str) -> String {
  let mut output = String::with_capacity(source.len());
  let mut chars = source.char_indices().peekable();
  let mut quote: Option<char> = None;
  let mut in_url = false;

  while let Some((index, ch)) = chars.next() {
    if let Some(open) = quote {
      output.push(ch);
      if ch == '\\' {
        if let Some((_, escaped)) = chars.next() {
          output.push(escaped);
        }
      } else if ch == open {
        quote = None;
      }
      continue;
    }

    let rest = &source[index + ch.len_utf8()..];
    match ch {
      '"' | '\'' => {
        quote = Some(ch);
        output.push(ch);
      }
      '(' if !in_url && source[..index].ends_with("url") => {
        in_url = true;
        output.push(ch);
      }
      ')' if in_url => {
        in_url = false;
        output.push(ch);
      }
      '/' if !in_url && rest.starts_with('*') => {
        chars.next();
        let mut previous = '\0';
        for (_, next) in chars.by_ref() {
          if previous == '*' && next == '/' {
            break;
          }
          previous = next;
        }
      }
      '/' if !in_url && rest.starts_with('/') => {
        while chars.next_if(|&(_, next)| next != '\n').is_some() {}
      }
      _ => output.push(ch),
    }
  }

  output
}

fn statement_targets<'a>(patterns: &ImportPatterns, body: &'a str) -> Vec<&'a str> {
  let quoted: Vec<&str> = patterns
    .target
    .captures_iter(body)
    .filter_map(|caps| caps.iter().skip(1).flatten().next().map(|m| m.as_str()))
    .collect();

  if !quoted.is_empty() {
    return quoted;
  }

  body
    .split(',')
    .filter_map(|item| item.split_whitespace().next())
    .collect()
}
