use assetpipe_common::{RawConfig, ResolveOptions, ResolvedPipeline};
use assetpipe_error::ConfigResult;

use crate::utils::resolve_config::resolve_config;

/// Turns a `RawConfig` into a `ResolvedPipeline`.
///
/// Holds no state besides its options, so one resolver can serve any number of configs, from any
/// number of threads.
#[derive(Debug, Default, Clone)]
pub struct ConfigResolver {
  options: ResolveOptions,
}

impl ConfigResolver {
  pub fn new(options: ResolveOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &ResolveOptions {
    &self.options
  }

  pub fn resolve(&self, raw: RawConfig) -> ConfigResult<ResolvedPipeline> {
    let span = tracing::debug_span!("resolve", config_dir = %self.options.config_dir.display());
    let _enter = span.enter();

    let result = resolve_config(raw, &self.options);
    match &result {
      Ok(pipeline) => {
        tracing::debug!(stages = ?pipeline.stage_names(), public = %pipeline.paths.public, "resolved");
      }
      Err(errors) => tracing::debug!(count = errors.len(), "configuration rejected"),
    }
    result
  }
}

/// Resolves a configuration that lives at the project root.
pub fn resolve(raw: RawConfig) -> ConfigResult<ResolvedPipeline> {
  ConfigResolver::default().resolve(raw)
}
