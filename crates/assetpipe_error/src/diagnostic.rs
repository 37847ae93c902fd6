use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
  MissingJoinTarget,
  InvalidAssetPattern,
  InvalidPath,
  MalformedPlugin,
  OverlappingPublicRoots,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigDiagnostic {
  #[error("`files.{category}.joinTo` is required but was not provided")]
  MissingJoinTarget { category: String },

  #[error("`conventions.assets` pattern `{pattern}` is invalid: {reason}")]
  InvalidAssetPattern { pattern: String, reason: String },

  #[error("`{field}` path {path:?} is invalid: {reason}")]
  InvalidPath { field: String, path: String, reason: &'static str },

  #[error("`plugins.{plugin}` must be an object of options, found {found}")]
  MalformedPlugin { plugin: String, found: &'static str },

  #[error("public roots `{first}` and `{second}` overlap")]
  OverlappingPublicRoots { first: String, second: String },
}

impl ConfigDiagnostic {
  pub fn kind(&self) -> ConfigErrorKind {
    match self {
      Self::MissingJoinTarget { .. } => ConfigErrorKind::MissingJoinTarget,
      Self::InvalidAssetPattern { .. } => ConfigErrorKind::InvalidAssetPattern,
      Self::InvalidPath { .. } => ConfigErrorKind::InvalidPath,
      Self::MalformedPlugin { .. } => ConfigErrorKind::MalformedPlugin,
      Self::OverlappingPublicRoots { .. } => ConfigErrorKind::OverlappingPublicRoots,
    }
  }
}
