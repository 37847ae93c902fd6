use assetpipe::{check_public_roots, ConfigResolver, RawConfig, ResolveOptions};

fn main() {
  let root = RawConfig::from_json_str(include_str!("phoenix/brunch-config.json")).unwrap();
  let assets = RawConfig::from_json_str(include_str!("phoenix/assets/brunch-config.json")).unwrap();

  let root = ConfigResolver::default().resolve(root).unwrap();
  let assets =
    ConfigResolver::new(ResolveOptions::with_config_dir("assets")).resolve(assets).unwrap();

  // Both configs write to `priv/static`.
  let _ = check_public_roots(&[&root, &assets]);
}
