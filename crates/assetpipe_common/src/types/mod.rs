pub mod asset_matcher;
pub mod processor_stage;
pub mod resolved_pipeline;
pub mod stage_registry;
