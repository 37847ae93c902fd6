use assetpipe::{
  check_public_roots, resolve, ConfigDiagnostic, ConfigErrorKind, ConfigResolver, RawConfig,
  RawConventions, RawPaths, ResolveOptions, DEFAULT_PUBLIC_ROOT, DEFAULT_WATCHED,
};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde_json::json;

const ROOT_CONFIG: &str = include_str!("../examples/phoenix/brunch-config.json");
const ASSETS_CONFIG: &str = include_str!("../examples/phoenix/assets/brunch-config.json");

fn from_json(value: serde_json::Value) -> RawConfig {
  serde_json::from_value(value).unwrap()
}

fn with_public(public: &str) -> RawConfig {
  RawConfig {
    paths: Some(RawPaths { watched: None, public: Some(public.to_string()) }),
    ..RawConfig::with_stylesheets("css/app.css")
  }
}

fn with_watched(watched: &[&str]) -> RawConfig {
  RawConfig {
    paths: Some(RawPaths {
      watched: Some(watched.iter().map(ToString::to_string).collect()),
      public: None,
    }),
    ..RawConfig::with_stylesheets("css/app.css")
  }
}

#[test]
fn empty_config_has_no_join_target() {
  let errors = resolve(RawConfig::default()).unwrap_err();
  assert_eq!(errors.kinds(), [ConfigErrorKind::MissingJoinTarget]);
  assert_eq!(
    errors[0],
    ConfigDiagnostic::MissingJoinTarget { category: "stylesheets".to_string() }
  );
}

#[test]
fn join_target_alone_gets_every_default() {
  let pipeline = resolve(RawConfig::with_stylesheets("css/app.css")).unwrap();

  assert_eq!(pipeline.paths.public, DEFAULT_PUBLIC_ROOT);
  assert_eq!(pipeline.paths.watched, DEFAULT_WATCHED);
  assert_eq!(pipeline.join_target("stylesheets"), Some("css/app.css"));
  assert!(pipeline.npm.enabled);
  assert!(pipeline.stages.is_empty());
  assert!(pipeline.modules.is_empty());
  assert!(pipeline.is_asset("app/assets/images/logo.png"));
  assert!(!pipeline.is_asset("app/styles/app.css"));
}

#[test]
fn postcss_runs_before_less_whatever_the_declaration_order() {
  for plugins in [
    json!({ "postcss": { "processors": ["autoprefixer"] }, "less": {} }),
    json!({ "less": {}, "postcss": { "processors": ["autoprefixer"] } }),
  ] {
    let pipeline = resolve(from_json(json!({
      "files": { "stylesheets": { "joinTo": "css/app.css" } },
      "plugins": plugins,
    })))
    .unwrap();

    assert_eq!(pipeline.stage_names(), ["postcss", "less"]);
    assert_eq!(
      pipeline.stage("postcss").unwrap().option("processors"),
      Some(&json!(["autoprefixer"]))
    );
    assert!(pipeline.stage("less").unwrap().options.is_empty());
  }
}

#[test]
fn other_plugins_follow_in_declaration_order() {
  let pipeline = resolve(from_json(json!({
    "files": { "stylesheets": { "joinTo": "css/app.css" } },
    "plugins": { "stylus": {}, "less": {}, "clean-css": {}, "postcss": {} },
  })))
  .unwrap();

  assert_eq!(pipeline.stage_names(), ["postcss", "less", "stylus", "clean-css"]);
}

#[test]
fn every_violation_is_reported_at_once() {
  let errors = resolve(from_json(json!({
    "conventions": { "assets": "^(static" },
    "paths": { "watched": ["static", "../outside"], "public": "" },
    "plugins": { "less": "enabled" },
  })))
  .unwrap_err();

  assert_eq!(
    errors.kinds(),
    [
      ConfigErrorKind::InvalidAssetPattern,
      ConfigErrorKind::MissingJoinTarget,
      ConfigErrorKind::InvalidPath,
      ConfigErrorKind::InvalidPath,
      ConfigErrorKind::MalformedPlugin,
    ]
  );
  assert!(matches!(
    &errors[3],
    ConfigDiagnostic::InvalidPath { field, path, .. } if field == "paths.watched[1]" && path == "../outside"
  ));
}

#[test]
fn invalid_pattern_alone() {
  let raw = RawConfig {
    conventions: Some(RawConventions { assets: Some("/[a-/".to_string()) }),
    ..RawConfig::with_stylesheets("css/app.css")
  };

  let errors = resolve(raw).unwrap_err();
  assert_eq!(errors.kinds(), [ConfigErrorKind::InvalidAssetPattern]);
}

#[test]
fn stylesheet_target_must_be_a_css_file() {
  let errors = resolve(RawConfig::with_stylesheets("css/app.less")).unwrap_err();
  assert_eq!(errors.kinds(), [ConfigErrorKind::InvalidPath]);

  let errors = resolve(RawConfig::with_stylesheets("")).unwrap_err();
  assert_eq!(errors.kinds(), [ConfigErrorKind::MissingJoinTarget]);
}

#[test]
fn paths_are_canonical() {
  let pipeline = resolve(from_json(json!({
    "files": {
      "stylesheets": { "joinTo": "./css/app.css" },
      "javascripts": { "joinTo": "js//app.js" },
    },
    "paths": {
      "watched": ["web/static/", "./test/static", "web/./lib/../vendor"],
      "public": "priv/static/",
    },
  })))
  .unwrap();

  assert_eq!(pipeline.paths.public, "priv/static");
  assert_eq!(pipeline.paths.watched, ["web/static", "test/static", "web/vendor"]);
  assert_eq!(pipeline.join_target("stylesheets"), Some("css/app.css"));
  assert_eq!(pipeline.join_target("javascripts"), Some("js/app.js"));
}

#[test]
fn resolutions_share_no_state() {
  let resolver = ConfigResolver::default();

  let first = resolver.resolve(with_watched(&["static", "styles"])).unwrap();
  let second = resolver.resolve(with_watched(&["web/static", "test/static"])).unwrap();
  let first_again = resolver.resolve(with_watched(&["static", "styles"])).unwrap();

  assert_eq!(first.paths.watched, ["static", "styles"]);
  assert_eq!(second.paths.watched, ["web/static", "test/static"]);
  assert_eq!(first, first_again);
}

#[test]
fn concurrent_resolutions_are_independent() {
  let resolver = ConfigResolver::default();

  let results: Vec<_> = (0..64)
    .into_par_iter()
    .map(|index| {
      let watched = if index % 2 == 0 { ["static", "styles"] } else { ["web/static", "test/static"] };
      (index, resolver.resolve(with_watched(&watched)).unwrap())
    })
    .collect();

  for (index, pipeline) in results {
    let expected = if index % 2 == 0 { ["static", "styles"] } else { ["web/static", "test/static"] };
    assert_eq!(pipeline.paths.watched, expected);
  }
}

#[test]
fn resolving_is_idempotent() {
  let cases = [
    (RawConfig::from_json_str(ROOT_CONFIG).unwrap(), ResolveOptions::default()),
    (RawConfig::from_json_str(ASSETS_CONFIG).unwrap(), ResolveOptions::with_config_dir("assets")),
    (RawConfig::with_stylesheets("./css/app.css"), ResolveOptions::default()),
  ];

  for (raw, options) in cases {
    let resolver = ConfigResolver::new(options);
    let once = resolver.resolve(raw).unwrap();
    let twice = resolver.resolve(once.to_raw()).unwrap();
    assert_eq!(once, twice);
  }
}

#[test]
fn phoenix_configs_resolve_independently() {
  let root = resolve(RawConfig::from_json_str(ROOT_CONFIG).unwrap()).unwrap();
  assert_eq!(root.paths.watched, ["web/static", "test/static"]);
  assert_eq!(root.paths.public, "priv/static");
  assert_eq!(root.stage_names(), ["postcss"]);
  assert!(root.is_asset("web/static/assets/robots.txt"));

  let assets = ConfigResolver::new(ResolveOptions::with_config_dir("assets"))
    .resolve(RawConfig::from_json_str(ASSETS_CONFIG).unwrap())
    .unwrap();
  assert_eq!(assets.paths.watched, ["static", "styles"]);
  assert_eq!(assets.paths.public, "../priv/static");
  assert_eq!(assets.stage_names(), ["postcss", "less"]);
  assert!(assets.is_asset("static/images/phoenix.png"));
  assert_eq!(
    assets.stage("postcss").unwrap().option("processors"),
    Some(&json!([{ "name": "autoprefixer", "args": [["last 4 versions"]] }]))
  );
}

#[test]
fn nested_public_root_cannot_leave_the_project() {
  let errors = resolve(RawConfig::from_json_str(ASSETS_CONFIG).unwrap()).unwrap_err();
  assert_eq!(errors.kinds(), [ConfigErrorKind::InvalidPath]);
}

#[test]
fn phoenix_configs_share_a_public_root() {
  let root = resolve(RawConfig::from_json_str(ROOT_CONFIG).unwrap()).unwrap();
  let assets = ConfigResolver::new(ResolveOptions::with_config_dir("assets"))
    .resolve(RawConfig::from_json_str(ASSETS_CONFIG).unwrap())
    .unwrap();

  let errors = check_public_roots(&[&root, &assets]).unwrap_err();
  assert_eq!(
    *errors,
    [ConfigDiagnostic::OverlappingPublicRoots {
      first: "priv/static".to_string(),
      second: "priv/static".to_string(),
    }]
  );

  let elsewhere = resolve(RawConfig::with_stylesheets("css/app.css")).unwrap();
  assert!(check_public_roots(&[&root, &elsewhere]).is_ok());
}

#[test]
fn project_root_as_public_root_overlaps_everything() {
  let nested = resolve(with_public("priv/static")).unwrap();
  let at_root = resolve(with_public(".")).unwrap();
  let collapsed = resolve(with_public("priv/..")).unwrap();
  let climbed = ConfigResolver::new(ResolveOptions::with_config_dir("assets"))
    .resolve(with_public(".."))
    .unwrap();

  for pipeline in [&at_root, &collapsed, &climbed] {
    let errors = check_public_roots(&[pipeline, &nested]).unwrap_err();
    assert_eq!(errors.kinds(), [ConfigErrorKind::OverlappingPublicRoots]);
  }
}

#[test]
fn nested_public_roots_overlap() {
  let outer = resolve(with_public("priv")).unwrap();
  let inner = ConfigResolver::new(ResolveOptions::with_config_dir("assets"))
    .resolve(with_public("../priv/static/css"))
    .unwrap();
  let sibling = resolve(with_public("priv-static")).unwrap();

  let errors = check_public_roots(&[&outer, &inner, &sibling]).unwrap_err();
  assert_eq!(
    *errors,
    [ConfigDiagnostic::OverlappingPublicRoots {
      first: "priv".to_string(),
      second: "priv/static/css".to_string(),
    }]
  );
}

#[test]
fn config_dir_must_stay_inside_the_project() {
  let raw = || RawConfig {
    paths: Some(RawPaths {
      watched: Some(vec!["../../../etc".to_string()]),
      public: Some("../../..".to_string()),
    }),
    ..RawConfig::with_stylesheets("css/app.css")
  };

  for config_dir in ["/srv/project/assets", "../outside"] {
    let errors =
      ConfigResolver::new(ResolveOptions::with_config_dir(config_dir)).resolve(raw()).unwrap_err();
    assert!(matches!(
      &errors[0],
      ConfigDiagnostic::InvalidPath { field, path, .. } if field == "config_dir" && path == config_dir
    ));
  }

  let errors = ConfigResolver::new(ResolveOptions::with_config_dir("/srv/project/assets"))
    .resolve(RawConfig::with_stylesheets("css/app.css"))
    .unwrap_err();
  assert_eq!(errors.kinds(), [ConfigErrorKind::InvalidPath]);
}

#[test]
fn unregistered_stages_are_named() {
  let pipeline = resolve(from_json(json!({
    "files": { "stylesheets": { "joinTo": "css/app.css" } },
    "plugins": { "postcss": {}, "fancy-css": {} },
  })))
  .unwrap();

  let registry: &[&str] = &["postcss", "less"];
  let missing = pipeline.unregistered_stages(registry);
  assert_eq!(missing.len(), 1);
  assert_eq!(missing[0].name.as_str(), "fancy-css");
}
