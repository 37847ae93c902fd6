use assetpipe_common::{JsonMap, JsonValue, RawConfig, RawConventions, RawNpm, RawPaths};
use assetpipe_utils::indexmap::FxIndexMap;

pub const DEFAULT_PUBLIC_ROOT: &str = "public";
pub const DEFAULT_WATCHED: [&str; 3] = ["app", "test", "vendor"];
pub const DEFAULT_ASSETS_PATTERN: &str = r"/assets[\\/]/";

/// Everything except a join target has a default.
pub fn default_config() -> RawConfig {
  RawConfig {
    files: Some(FxIndexMap::default()),
    conventions: Some(RawConventions { assets: Some(DEFAULT_ASSETS_PATTERN.to_string()) }),
    paths: Some(RawPaths {
      watched: Some(DEFAULT_WATCHED.iter().map(ToString::to_string).collect()),
      public: Some(DEFAULT_PUBLIC_ROOT.to_string()),
    }),
    plugins: Some(FxIndexMap::default()),
    modules: Some(JsonMap::new()),
    npm: Some(RawNpm { enabled: Some(true) }),
  }
}

/// Lays `raw` over `defaults`, field by field.
///
/// Scalars and sequences present in `raw` replace the default wholesale. Mappings merge per key: a
/// key present in `raw` replaces the default value for that key, keys keep `raw`'s declaration order
/// and default-only keys follow.
pub fn merge_config(defaults: RawConfig, raw: RawConfig) -> RawConfig {
  let RawConfig { files, conventions, paths, plugins, modules, npm } = raw;
  let paths = paths.unwrap_or_default();
  let default_paths = defaults.paths.unwrap_or_default();

  RawConfig {
    files: merge_keyed(defaults.files, files),
    conventions: Some(RawConventions {
      assets: conventions
        .and_then(|conventions| conventions.assets)
        .or_else(|| defaults.conventions.and_then(|conventions| conventions.assets)),
    }),
    paths: Some(RawPaths {
      watched: paths.watched.or(default_paths.watched),
      public: paths.public.or(default_paths.public),
    }),
    plugins: merge_keyed(defaults.plugins, plugins),
    modules: merge_json_map(defaults.modules, modules),
    npm: Some(RawNpm {
      enabled: npm.and_then(|npm| npm.enabled).or_else(|| defaults.npm.and_then(|npm| npm.enabled)),
    }),
  }
}

fn merge_keyed<V>(
  defaults: Option<FxIndexMap<String, V>>,
  raw: Option<FxIndexMap<String, V>>,
) -> Option<FxIndexMap<String, V>> {
  match (defaults, raw) {
    (Some(defaults), Some(mut raw)) => {
      for (key, value) in defaults {
        raw.entry(key).or_insert(value);
      }
      Some(raw)
    }
    (defaults, raw) => raw.or(defaults),
  }
}

fn merge_json_map(
  defaults: Option<JsonMap<String, JsonValue>>,
  raw: Option<JsonMap<String, JsonValue>>,
) -> Option<JsonMap<String, JsonValue>> {
  match (defaults, raw) {
    (Some(defaults), Some(mut raw)) => {
      for (key, value) in defaults {
        raw.entry(key).or_insert(value);
      }
      Some(raw)
    }
    (defaults, raw) => raw.or(defaults),
  }
}

#[test]
fn test_empty_raw_keeps_defaults() {
  assert_eq!(merge_config(default_config(), RawConfig::default()), default_config());
}

#[test]
fn test_sequences_are_replaced_not_appended() {
  let raw = RawConfig {
    paths: Some(RawPaths { watched: Some(vec!["static".to_string()]), public: None }),
    ..Default::default()
  };

  let merged = merge_config(default_config(), raw).paths.unwrap();
  assert_eq!(merged.watched.unwrap(), ["static"]);
  assert_eq!(merged.public.as_deref(), Some(DEFAULT_PUBLIC_ROOT));
}

#[test]
fn test_plugins_merge_per_key() {
  let mut defaults = default_config();
  let mut default_plugins = FxIndexMap::default();
  default_plugins.insert("postcss".to_string(), serde_json::json!({ "processors": [] }));
  default_plugins.insert("sass".to_string(), serde_json::json!({ "mode": "native" }));
  defaults.plugins = Some(default_plugins);

  let mut plugins = FxIndexMap::default();
  plugins.insert("less".to_string(), serde_json::json!({}));
  plugins.insert("postcss".to_string(), serde_json::json!({ "processors": ["autoprefixer"] }));
  let raw = RawConfig { plugins: Some(plugins), ..Default::default() };

  let merged = merge_config(defaults, raw).plugins.unwrap();
  assert_eq!(merged.keys().collect::<Vec<_>>(), ["less", "postcss", "sass"]);
  assert_eq!(merged["postcss"], serde_json::json!({ "processors": ["autoprefixer"] }));
  assert_eq!(merged["sass"], serde_json::json!({ "mode": "native" }));
}

#[test]
fn test_scalars_override() {
  let raw = RawConfig {
    npm: Some(RawNpm { enabled: Some(false) }),
    conventions: Some(RawConventions { assets: Some("^(static)".to_string()) }),
    ..Default::default()
  };

  let merged = merge_config(default_config(), raw);
  assert_eq!(merged.npm.unwrap().enabled, Some(false));
  assert_eq!(merged.conventions.unwrap().assets.as_deref(), Some("^(static)"));
}
