pub mod build_stages;
pub mod check_public_roots;
pub mod merge_config;
pub mod normalize_paths;
pub mod resolve_config;
