use assetpipe_common::ResolvedPipeline;
use assetpipe_error::{ConfigDiagnostic, ConfigError, ConfigResult};
use assetpipe_utils::path_ext::PathExt;
use itertools::Itertools;

/// Every pipeline processed together must own a distinct public root; no root may contain another.
pub fn check_public_roots(pipelines: &[&ResolvedPipeline]) -> ConfigResult<()> {
  let roots = pipelines.iter().map(|pipeline| pipeline.public_root_in_project()).collect_vec();

  let diagnostics = roots
    .iter()
    .tuple_combinations()
    .filter(|(first, second)| first.overlaps(second))
    .map(|(first, second)| ConfigDiagnostic::OverlappingPublicRoots {
      first: first.to_canonical_slash(),
      second: second.to_canonical_slash(),
    })
    .collect_vec();

  ConfigError::into_result(diagnostics, ())
}
