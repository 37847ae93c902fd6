use std::sync::Arc;

use arcstr::ArcStr;
use serde::Serialize;

use crate::{JsonMap, JsonValue};

/// One named step of CSS post-processing. The option payload is frozen and never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessorStage {
  pub name: ArcStr,
  pub options: Arc<JsonMap<String, JsonValue>>,
}

impl ProcessorStage {
  pub fn new(name: impl Into<ArcStr>, options: JsonMap<String, JsonValue>) -> Self {
    Self { name: name.into(), options: Arc::new(options) }
  }

  pub fn option(&self, key: &str) -> Option<&JsonValue> {
    self.options.get(key)
  }
}
