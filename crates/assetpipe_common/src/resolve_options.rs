use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
  /// Directory holding the configuration file, relative to the project root.
  /// Paths in the configuration are relative to it; nothing may resolve above the project root.
  /// An absolute or escaping directory is rejected when resolving.
  pub config_dir: PathBuf,
}

impl ResolveOptions {
  pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
    Self { config_dir: config_dir.into() }
  }
}
