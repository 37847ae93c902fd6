use std::path::{Path, PathBuf};

use assetpipe_utils::{indexmap::FxIndexMap, path_ext::PathExt};
use serde::Serialize;

use crate::{
  AssetMatcher, JsonMap, JsonValue, ProcessorStage, RawConfig, RawConventions, RawFileGroup,
  RawNpm, RawPaths, StageRegistry,
};

/// Fully defaulted and validated configuration, handed to a build executor as is.
///
/// All paths are canonical, forward-slash separated and relative to `config_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPipeline {
  pub files: FxIndexMap<String, JoinTarget>,
  pub conventions: ResolvedConventions,
  pub paths: ResolvedPaths,
  pub stages: Vec<ProcessorStage>,
  pub modules: JsonMap<String, JsonValue>,
  pub npm: ResolvedNpm,
  pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinTarget {
  pub join_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConventions {
  pub assets: AssetMatcher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
  pub watched: Vec<String>,
  pub public: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedNpm {
  pub enabled: bool,
}

impl ResolvedPipeline {
  pub fn stage(&self, name: &str) -> Option<&ProcessorStage> {
    self.stages.iter().find(|stage| stage.name.as_str() == name)
  }

  pub fn stage_names(&self) -> Vec<&str> {
    self.stages.iter().map(|stage| stage.name.as_str()).collect()
  }

  pub fn join_target(&self, category: &str) -> Option<&str> {
    self.files.get(category).map(|target| target.join_to.as_str())
  }

  pub fn is_asset(&self, path: &str) -> bool {
    self.conventions.assets.is_match(path)
  }

  /// The public root as seen from the project root, used to compare configs living in different directories.
  pub fn public_root_in_project(&self) -> PathBuf {
    self.config_dir.join(Path::new(&self.paths.public)).lexical_normalize()
  }

  pub fn unregistered_stages<R: StageRegistry + ?Sized>(&self, registry: &R) -> Vec<&ProcessorStage> {
    self.stages.iter().filter(|stage| !registry.has_stage(&stage.name)).collect()
  }

  /// Projects back into a fully populated `RawConfig`. Resolving the result yields `self` again.
  pub fn to_raw(&self) -> RawConfig {
    let files = self
      .files
      .iter()
      .map(|(category, target)| {
        (category.clone(), RawFileGroup { join_to: Some(target.join_to.clone()) })
      })
      .collect();

    let plugins = self
      .stages
      .iter()
      .map(|stage| (stage.name.to_string(), JsonValue::Object((*stage.options).clone())))
      .collect();

    RawConfig {
      files: Some(files),
      conventions: Some(RawConventions {
        assets: Some(self.conventions.assets.source().to_string()),
      }),
      paths: Some(RawPaths {
        watched: Some(self.paths.watched.clone()),
        public: Some(self.paths.public.clone()),
      }),
      plugins: Some(plugins),
      modules: Some(self.modules.clone()),
      npm: Some(RawNpm { enabled: Some(self.npm.enabled) }),
    }
  }
}
