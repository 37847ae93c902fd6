/// Lookup side of the plugin registry that turns a stage name into a runnable transform.
///
/// Resolution only names and orders stages; a registry answers whether a name can be provided.
pub trait StageRegistry {
  fn has_stage(&self, name: &str) -> bool;
}

impl<T: AsRef<str>> StageRegistry for [T] {
  fn has_stage(&self, name: &str) -> bool {
    self.iter().any(|known| known.as_ref() == name)
  }
}

#[test]
fn test_slice_registry() {
  let registry: &[&str] = &["postcss", "less"];
  assert!(registry.has_stage("less"));
  assert!(!registry.has_stage("sass"));
}
