use std::path::Path;

use assetpipe_error::ConfigDiagnostic;
use assetpipe_utils::path_ext::PathExt;

pub const STYLESHEET_EXTENSIONS: [&str; 1] = ["css"];

/// Canonical form of a directory from `paths.*`, relative to the config dir.
///
/// The path may leave the config dir (`../priv/static`) as long as it stays inside the project.
pub fn normalize_config_path(
  field: &str,
  raw: &str,
  config_dir: &Path,
) -> Result<String, ConfigDiagnostic> {
  let invalid = |reason| ConfigDiagnostic::InvalidPath {
    field: field.to_string(),
    path: raw.to_string(),
    reason,
  };

  if raw.trim().is_empty() {
    return Err(invalid("path is empty"));
  }

  let path = Path::new(raw);
  if path.has_root() {
    return Err(invalid("path must be relative to the project"));
  }
  if config_dir.join(path).escapes_root() {
    return Err(invalid("path resolves above the project root"));
  }

  let normalized = path.to_canonical_slash();
  tracing::trace!(field, raw, %normalized, "normalized path");
  Ok(normalized)
}

/// Canonical form of `files.<category>.joinTo`, relative to the public root.
pub fn normalize_join_target(category: &str, raw: &str) -> Result<String, ConfigDiagnostic> {
  if raw.trim().is_empty() {
    return Err(ConfigDiagnostic::MissingJoinTarget { category: category.to_string() });
  }

  let invalid = |reason| ConfigDiagnostic::InvalidPath {
    field: format!("files.{category}.joinTo"),
    path: raw.to_string(),
    reason,
  };

  let path = Path::new(raw);
  if path.has_root() {
    return Err(invalid("join target must be relative to the public root"));
  }
  if path.escapes_root() {
    return Err(invalid("join target resolves above the public root"));
  }

  let normalized = path.to_canonical_slash();
  if normalized == "." {
    return Err(invalid("join target must name a file"));
  }

  if category == "stylesheets" && !has_stylesheet_extension(Path::new(&normalized)) {
    return Err(invalid("stylesheet output must end in `.css`"));
  }

  Ok(normalized)
}

fn has_stylesheet_extension(path: &Path) -> bool {
  path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
    STYLESHEET_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext))
  })
}

#[test]
fn test_normalize_config_path() {
  let root = Path::new("");
  assert_eq!(normalize_config_path("paths.public", "priv/static/", root).unwrap(), "priv/static");
  assert_eq!(normalize_config_path("paths.watched", "./web/static", root).unwrap(), "web/static");

  let assets = Path::new("assets");
  assert_eq!(
    normalize_config_path("paths.public", "../priv/static", assets).unwrap(),
    "../priv/static"
  );
}

#[test]
fn test_normalize_config_path_rejects() {
  let reason = |raw: &str, config_dir: &str| match normalize_config_path(
    "paths.public",
    raw,
    Path::new(config_dir),
  ) {
    Err(ConfigDiagnostic::InvalidPath { reason, .. }) => reason,
    other => panic!("expected an invalid path, got {other:?}"),
  };

  assert_eq!(reason("", ""), "path is empty");
  assert_eq!(reason("  ", "assets"), "path is empty");
  assert_eq!(reason("/srv/www", ""), "path must be relative to the project");
  assert_eq!(reason("../priv/static", ""), "path resolves above the project root");
  assert_eq!(reason("../../priv/static", "assets"), "path resolves above the project root");
}

#[test]
fn test_normalize_join_target() {
  assert_eq!(normalize_join_target("stylesheets", "css/app.css").unwrap(), "css/app.css");
  assert_eq!(normalize_join_target("stylesheets", "./css//app.CSS").unwrap(), "css/app.CSS");
  assert_eq!(normalize_join_target("javascripts", "js/app.js").unwrap(), "js/app.js");

  assert_eq!(
    normalize_join_target("stylesheets", ""),
    Err(ConfigDiagnostic::MissingJoinTarget { category: "stylesheets".to_string() })
  );
  assert!(normalize_join_target("stylesheets", "css/app.less").is_err());
  assert!(normalize_join_target("stylesheets", "../app.css").is_err());
  assert!(normalize_join_target("stylesheets", "/css/app.css").is_err());
}
