use assetpipe_common::{JsonValue, ProcessorStage};
use assetpipe_error::ConfigDiagnostic;
use assetpipe_utils::indexmap::FxIndexMap;
use itertools::Itertools;

/// Stages that always run first, in this order. Everything else keeps its declaration order.
const LEADING_STAGES: [&str; 2] = ["postcss", "less"];

fn stage_rank(name: &str) -> usize {
  LEADING_STAGES.iter().position(|leading| *leading == name).unwrap_or(LEADING_STAGES.len())
}

pub fn build_stages(
  plugins: FxIndexMap<String, JsonValue>,
  diagnostics: &mut Vec<ConfigDiagnostic>,
) -> Vec<ProcessorStage> {
  plugins
    .into_iter()
    .filter_map(|(name, payload)| match payload {
      JsonValue::Object(options) => Some(ProcessorStage::new(name, options)),
      other => {
        diagnostics.push(ConfigDiagnostic::MalformedPlugin { plugin: name, found: json_kind(&other) });
        None
      }
    })
    // `sorted_by_key` is stable, so non-leading stages stay in declaration order.
    .sorted_by_key(|stage| stage_rank(&stage.name))
    .collect()
}

fn json_kind(value: &JsonValue) -> &'static str {
  match value {
    JsonValue::Null => "null",
    JsonValue::Bool(_) => "a boolean",
    JsonValue::Number(_) => "a number",
    JsonValue::String(_) => "a string",
    JsonValue::Array(_) => "an array",
    JsonValue::Object(_) => "an object",
  }
}

#[cfg(test)]
fn plugins(entries: &[(&str, JsonValue)]) -> FxIndexMap<String, JsonValue> {
  entries.iter().map(|(name, payload)| ((*name).to_string(), payload.clone())).collect()
}

#[test]
fn test_leading_stages_go_first() {
  let mut diagnostics = vec![];
  let stages = build_stages(
    plugins(&[
      ("stylus", serde_json::json!({})),
      ("less", serde_json::json!({})),
      ("clean-css", serde_json::json!({ "level": 2 })),
      ("postcss", serde_json::json!({ "processors": ["autoprefixer"] })),
    ]),
    &mut diagnostics,
  );

  let names: Vec<_> = stages.iter().map(|stage| stage.name.as_str()).collect();
  assert_eq!(names, ["postcss", "less", "stylus", "clean-css"]);
  assert!(diagnostics.is_empty());
}

#[test]
fn test_payload_is_passed_through_verbatim() {
  let payload = serde_json::json!({
    "processors": [
      { "name": "autoprefixer", "args": ["last 4 versions"] },
      { "name": "cssnano" }
    ]
  });

  let mut diagnostics = vec![];
  let stages = build_stages(plugins(&[("postcss", payload.clone())]), &mut diagnostics);
  assert_eq!(JsonValue::Object((*stages[0].options).clone()), payload);
}

#[test]
fn test_malformed_payloads_are_reported() {
  let mut diagnostics = vec![];
  let stages = build_stages(
    plugins(&[("less", serde_json::json!(true)), ("postcss", serde_json::json!([]))]),
    &mut diagnostics,
  );

  assert!(stages.is_empty());
  assert_eq!(
    diagnostics,
    [
      ConfigDiagnostic::MalformedPlugin { plugin: "less".to_string(), found: "a boolean" },
      ConfigDiagnostic::MalformedPlugin { plugin: "postcss".to_string(), found: "an array" },
    ]
  );
}
