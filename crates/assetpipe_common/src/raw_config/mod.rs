use assetpipe_utils::indexmap::FxIndexMap;
use serde::{de::Error as _, Deserialize, Serialize};

use crate::{JsonMap, JsonValue};

/// Configuration as the user declared it. Every field is optional; defaults are applied when resolving.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
  // --- Output
  #[serde(skip_serializing_if = "Option::is_none")]
  pub files: Option<FxIndexMap<String, RawFileGroup>>,

  // --- Input
  #[serde(skip_serializing_if = "Option::is_none")]
  pub conventions: Option<RawConventions>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub paths: Option<RawPaths>,

  // --- Processing
  /// Plugin name to option payload. Payloads are opaque and must be objects.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub plugins: Option<FxIndexMap<String, JsonValue>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub modules: Option<JsonMap<String, JsonValue>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub npm: Option<RawNpm>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFileGroup {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub join_to: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConventions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assets: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPaths {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub watched: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub public: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNpm {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enabled: Option<bool>,
}

impl RawConfig {
  /// The document must be a JSON object; derived deserializers would otherwise accept arrays.
  pub fn from_json_str(source: &str) -> serde_json::Result<Self> {
    let value: JsonValue = serde_json::from_str(source)?;
    if !value.is_object() {
      return Err(serde_json::Error::custom("configuration must be an object"));
    }
    serde_json::from_value(value)
  }

  /// Shorthand for the one field that has no default.
  pub fn with_stylesheets(join_to: impl Into<String>) -> Self {
    let mut files = FxIndexMap::default();
    files.insert("stylesheets".to_string(), RawFileGroup { join_to: Some(join_to.into()) });
    Self { files: Some(files), ..Default::default() }
  }
}

#[test]
fn test_from_json_str_keeps_declaration_order() {
  let raw = RawConfig::from_json_str(
    r#"{
      "files": { "stylesheets": { "joinTo": "css/app.css" } },
      "conventions": { "assets": "^(static)" },
      "paths": { "watched": ["static", "styles"], "public": "../priv/static" },
      "plugins": {
        "less": {},
        "postcss": { "processors": [{ "name": "autoprefixer", "args": ["last 4 versions"] }] }
      },
      "modules": {},
      "npm": { "enabled": true }
    }"#,
  )
  .unwrap();

  let plugins = raw.plugins.as_ref().unwrap();
  assert_eq!(plugins.keys().collect::<Vec<_>>(), ["less", "postcss"]);
  assert_eq!(raw.files.unwrap()["stylesheets"].join_to.as_deref(), Some("css/app.css"));
  assert_eq!(raw.paths.unwrap().watched.unwrap(), ["static", "styles"]);
  assert_eq!(raw.npm.unwrap().enabled, Some(true));
}

#[test]
fn test_from_json_str_rejects_non_mapping() {
  assert!(RawConfig::from_json_str("[]").is_err());
  assert!(RawConfig::from_json_str(r#""css/app.css""#).is_err());
  assert_eq!(RawConfig::from_json_str("{}").unwrap(), RawConfig::default());
}
