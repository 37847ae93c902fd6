mod raw_config;
mod resolve_options;
mod types;

pub use crate::{
  raw_config::{RawConfig, RawConventions, RawFileGroup, RawNpm, RawPaths},
  resolve_options::ResolveOptions,
  types::{
    asset_matcher::{AssetMatcher, AssetPatternError},
    processor_stage::ProcessorStage,
    resolved_pipeline::{
      JoinTarget, ResolvedConventions, ResolvedNpm, ResolvedPaths, ResolvedPipeline,
    },
    stage_registry::StageRegistry,
  },
};

pub use serde_json::{Map as JsonMap, Value as JsonValue};
