mod diagnostic;

use std::{
  fmt::Display,
  ops::{Deref, DerefMut},
};

pub use crate::diagnostic::{ConfigDiagnostic, ConfigErrorKind};

/// Every rule a configuration violated, collected in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub Vec<ConfigDiagnostic>);

impl ConfigError {
  pub fn kinds(&self) -> Vec<ConfigErrorKind> {
    self.0.iter().map(ConfigDiagnostic::kind).collect()
  }

  pub fn contains(&self, kind: ConfigErrorKind) -> bool {
    self.0.iter().any(|diagnostic| diagnostic.kind() == kind)
  }

  /// `Ok(value)` when nothing was collected, otherwise every diagnostic at once.
  pub fn into_result<T>(diagnostics: Vec<ConfigDiagnostic>, value: T) -> ConfigResult<T> {
    if diagnostics.is_empty() {
      Ok(value)
    } else {
      Err(Self(diagnostics))
    }
  }
}

impl Deref for ConfigError {
  type Target = Vec<ConfigDiagnostic>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for ConfigError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<ConfigDiagnostic> for ConfigError {
  fn from(diagnostic: ConfigDiagnostic) -> Self {
    Self(vec![diagnostic])
  }
}

impl From<Vec<ConfigDiagnostic>> for ConfigError {
  fn from(diagnostics: Vec<ConfigDiagnostic>) -> Self {
    Self(diagnostics)
  }
}

impl Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.0.as_slice() {
      [single] => write!(f, "{single}"),
      diagnostics => {
        write!(f, "{} configuration errors", diagnostics.len())?;
        for diagnostic in diagnostics {
          write!(f, "\n  - {diagnostic}")?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[test]
fn test_display_lists_every_diagnostic() {
  let error = ConfigError(vec![
    ConfigDiagnostic::MissingJoinTarget { category: "stylesheets".to_string() },
    ConfigDiagnostic::MalformedPlugin { plugin: "less".to_string(), found: "array" },
  ]);

  let message = error.to_string();
  assert!(message.starts_with("2 configuration errors"));
  assert!(message.contains("`files.stylesheets.joinTo`"));
  assert!(message.contains("`plugins.less`"));
  assert_eq!(error.kinds(), vec![ConfigErrorKind::MissingJoinTarget, ConfigErrorKind::MalformedPlugin]);
}

#[test]
fn test_into_result() {
  assert_eq!(ConfigError::into_result(vec![], 1), Ok(1));

  let diagnostic = ConfigDiagnostic::MissingJoinTarget { category: "stylesheets".to_string() };
  let error = ConfigError::into_result(vec![diagnostic], 1).unwrap_err();
  assert!(error.contains(ConfigErrorKind::MissingJoinTarget));
  assert!(!error.contains(ConfigErrorKind::InvalidPath));
}
