use assetpipe_common::{
  AssetMatcher, JoinTarget, RawConfig, ResolveOptions, ResolvedConventions, ResolvedNpm,
  ResolvedPaths, ResolvedPipeline,
};
use assetpipe_error::{ConfigDiagnostic, ConfigError, ConfigResult};
use assetpipe_utils::{indexmap::FxIndexMap, path_ext::PathExt};

use super::{
  build_stages::build_stages,
  merge_config::{default_config, merge_config},
  normalize_paths::{normalize_config_path, normalize_join_target},
};

/// Category whose join target is mandatory.
const REQUIRED_CATEGORY: &str = "stylesheets";

pub fn resolve_config(raw: RawConfig, options: &ResolveOptions) -> ConfigResult<ResolvedPipeline> {
  let merged = merge_config(default_config(), raw);
  let mut diagnostics = vec![];

  let config_dir = &options.config_dir;
  if config_dir.has_root() || config_dir.escapes_root() {
    diagnostics.push(ConfigDiagnostic::InvalidPath {
      field: "config_dir".to_string(),
      path: config_dir.to_string_lossy().into_owned(),
      reason: "config dir must be a directory inside the project root",
    });
  }

  let assets_pattern =
    merged.conventions.and_then(|conventions| conventions.assets).unwrap_or_default();
  let assets = AssetMatcher::new(&assets_pattern)
    .map_err(|err| {
      diagnostics.push(ConfigDiagnostic::InvalidAssetPattern {
        pattern: assets_pattern.clone(),
        reason: err.to_string(),
      });
    })
    .ok();

  let raw_files = merged.files.unwrap_or_default();
  if raw_files.get(REQUIRED_CATEGORY).and_then(|group| group.join_to.as_ref()).is_none() {
    diagnostics
      .push(ConfigDiagnostic::MissingJoinTarget { category: REQUIRED_CATEGORY.to_string() });
  }
  let mut files = FxIndexMap::default();
  for (category, group) in raw_files {
    let Some(join_to) = group.join_to else {
      continue;
    };
    match normalize_join_target(&category, &join_to) {
      Ok(join_to) => {
        files.insert(category, JoinTarget { join_to });
      }
      Err(diagnostic) => diagnostics.push(diagnostic),
    }
  }

  let paths = merged.paths.unwrap_or_default();
  let public = normalize_config_path(
    "paths.public",
    paths.public.as_deref().unwrap_or_default(),
    &options.config_dir,
  )
  .map_err(|diagnostic| diagnostics.push(diagnostic))
  .ok();
  let watched = paths
    .watched
    .unwrap_or_default()
    .iter()
    .enumerate()
    .filter_map(|(index, path)| {
      normalize_config_path(&format!("paths.watched[{index}]"), path, &options.config_dir)
        .map_err(|diagnostic| diagnostics.push(diagnostic))
        .ok()
    })
    .collect::<Vec<_>>();

  let stages = build_stages(merged.plugins.unwrap_or_default(), &mut diagnostics);
  tracing::debug!(
    order = ?stages.iter().map(|stage| stage.name.as_str()).collect::<Vec<_>>(),
    "ordered processor stages"
  );

  match (assets, public) {
    (Some(assets), Some(public)) if diagnostics.is_empty() => Ok(ResolvedPipeline {
      files,
      conventions: ResolvedConventions { assets },
      paths: ResolvedPaths { watched, public },
      stages,
      modules: merged.modules.unwrap_or_default(),
      npm: ResolvedNpm { enabled: merged.npm.and_then(|npm| npm.enabled).unwrap_or(true) },
      config_dir: options.config_dir.clone(),
    }),
    _ => Err(ConfigError(diagnostics)),
  }
}
