use std::fmt::Display;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

/// Compiled `conventions.assets` pattern.
///
/// Accepts either a bare pattern (`^(static)`) or a JS-style literal (`/^(static)/i`). Equality and
/// serialization use the source text so a resolved config can be fed back in unchanged.
#[derive(Debug, Clone)]
pub struct AssetMatcher {
  source: String,
  regex: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPatternError(pub String);

impl Display for AssetPatternError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl AssetMatcher {
  pub fn new(source: &str) -> Result<Self, AssetPatternError> {
    if source.is_empty() {
      return Err(AssetPatternError("pattern is empty".to_string()));
    }

    let (pattern, flags) = split_literal(source);
    if pattern.is_empty() {
      return Err(AssetPatternError("pattern is empty".to_string()));
    }

    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
      match flag {
        'i' => {
          builder.case_insensitive(true);
        }
        'm' => {
          builder.multi_line(true);
        }
        's' => {
          builder.dot_matches_new_line(true);
        }
        'x' => {
          builder.ignore_whitespace(true);
        }
        'u' => {
          builder.unicode(true);
        }
        // Stateful matching flags have no meaning for a one-shot path test.
        'g' | 'y' => {}
        other => return Err(AssetPatternError(format!("unsupported flag `{other}`"))),
      }
    }

    let regex = builder.build().map_err(|err| AssetPatternError(err.to_string()))?;
    Ok(Self { source: source.to_string(), regex })
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  /// Tests a project path, always in forward-slash form.
  pub fn is_match(&self, path: &str) -> bool {
    if path.contains('\\') {
      self.regex.is_match(&path.replace('\\', "/"))
    } else {
      self.regex.is_match(path)
    }
  }
}

/// `/body/flags` -> (`body`, `flags`); anything else is a bare pattern without flags.
fn split_literal(source: &str) -> (&str, &str) {
  if let Some(rest) = source.strip_prefix('/') {
    if let Some(end) = rest.rfind('/') {
      let flags = &rest[end + 1..];
      if flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return (&rest[..end], flags);
      }
    }
  }
  (source, "")
}

impl PartialEq for AssetMatcher {
  fn eq(&self, other: &Self) -> bool {
    self.source == other.source
  }
}

impl Eq for AssetMatcher {}

impl Serialize for AssetMatcher {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.source)
  }
}

#[test]
fn test_bare_pattern() {
  let matcher = AssetMatcher::new("^(static)").unwrap();
  assert!(matcher.is_match("static/images/logo.png"));
  assert!(!matcher.is_match("styles/app.less"));
}

#[test]
fn test_literal_pattern() {
  let matcher = AssetMatcher::new(r"/^(web\/static\/assets)/").unwrap();
  assert!(matcher.is_match("web/static/assets/robots.txt"));
  assert!(!matcher.is_match("web/static/css/app.css"));

  let matcher = AssetMatcher::new("/^(STATIC)/i").unwrap();
  assert!(matcher.is_match("static/favicon.ico"));
}

#[test]
fn test_backslash_paths_are_matched_in_slash_form() {
  let matcher = AssetMatcher::new(r"assets[\\/]").unwrap();
  assert!(matcher.is_match("app/assets/index.html"));
  assert!(matcher.is_match(r"app\assets\index.html"));
}

#[test]
fn test_invalid_patterns() {
  assert!(AssetMatcher::new("^(static").is_err());
  assert!(AssetMatcher::new("").is_err());
  assert_eq!(
    AssetMatcher::new("//").unwrap_err(),
    AssetPatternError("pattern is empty".to_string())
  );
  assert!(AssetMatcher::new("//i").is_err());
  assert_eq!(
    AssetMatcher::new("/^(static)/q").unwrap_err(),
    AssetPatternError("unsupported flag `q`".to_string())
  );
}
