mod args;
mod types;

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
  time::Instant,
};

use ansi_term::Colour;
use anyhow::Context;
use args::{InputArgs, OutputArgs};
use clap::Parser;
use sugar_path::SugarPath;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetpipe::{
  check_public_roots, ConfigError, ConfigResolver, RawConfig, ResolveOptions, ResolvedPipeline,
};
use types::report_format::ReportFormat;

/// Stages the bundled processor registry knows how to run.
const KNOWN_STAGES: &[&str] = &["postcss", "less", "sass", "stylus", "clean-css"];

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,
}

fn load_raw_config(path: &Path) -> anyhow::Result<RawConfig> {
  let source =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  RawConfig::from_json_str(&source).with_context(|| format!("failed to parse {}", path.display()))
}

fn config_dir_of(config: &Path, root: &Path) -> anyhow::Result<PathBuf> {
  let config = config.absolutize();
  let parent = config.parent().unwrap_or(root);
  parent
    .strip_prefix(root)
    .map(Path::to_path_buf)
    .with_context(|| format!("{} is outside the project root {}", config.display(), root.display()))
}

fn print_errors(origin: &Path, errors: &ConfigError) {
  for error in errors.iter() {
    println!(
      "{} {} {}",
      Colour::Red.paint("Error:"),
      Colour::White.dimmed().paint(origin.display().to_string()),
      error
    );
  }
}

fn print_summary(origin: &Path, pipeline: &ResolvedPipeline) {
  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  println!("{}", Colour::White.bold().paint(origin.display().to_string()));
  for (category, target) in &pipeline.files {
    println!("  {}{}", dim.paint(format!("{category:<12}")), color.paint(target.join_to.as_str()));
  }
  println!("  {}{}", dim.paint(format!("{:<12}", "public")), color.paint(pipeline.paths.public.as_str()));
  println!("  {}{}", dim.paint(format!("{:<12}", "watched")), pipeline.paths.watched.join(", "));
  println!("  {}{}", dim.paint(format!("{:<12}", "assets")), pipeline.conventions.assets.source());

  let stages = if pipeline.stages.is_empty() {
    dim.paint("(none)").to_string()
  } else {
    pipeline.stage_names().join(dim.paint(" → ").to_string().as_str())
  };
  println!("  {}{}", dim.paint(format!("{:<12}", "stages")), stages);
  println!(
    "  {}{}",
    dim.paint(format!("{:<12}", "npm")),
    if pipeline.npm.enabled { "enabled" } else { "disabled" }
  );
}

fn run(args: Commands) -> anyhow::Result<bool> {
  let InputArgs { configs, root, config_dir } = args.input;
  let root = match root {
    Some(root) => root.absolutize(),
    None => std::env::current_dir().context("failed to read the current directory")?,
  };

  if config_dir.is_some() && configs.len() > 1 {
    anyhow::bail!("--config-dir can only be used with a single configuration file");
  }

  let mut ok = true;
  let mut resolved = Vec::with_capacity(configs.len());
  for path in &configs {
    let raw = load_raw_config(path)?;
    let config_dir = match &config_dir {
      Some(dir) => dir.clone(),
      None => config_dir_of(path, &root)?,
    };
    tracing::info!(config = %path.display(), config_dir = %config_dir.display(), "resolving");

    match ConfigResolver::new(ResolveOptions { config_dir }).resolve(raw) {
      Ok(pipeline) => resolved.push((path.as_path(), pipeline)),
      Err(errors) => {
        ok = false;
        print_errors(path, &errors);
      }
    }
  }

  if resolved.len() > 1 {
    let pipelines: Vec<_> = resolved.iter().map(|(_, pipeline)| pipeline).collect();
    if let Err(errors) = check_public_roots(&pipelines) {
      ok = false;
      print_errors(&root, &errors);
    }
  }

  if args.output.silent {
    return Ok(ok);
  }

  for (path, pipeline) in &resolved {
    for stage in pipeline.unregistered_stages(KNOWN_STAGES) {
      println!(
        "{} {} no registered processor provides stage `{}`",
        Colour::Yellow.paint("Warning:"),
        Colour::White.dimmed().paint(path.display().to_string()),
        stage.name
      );
    }
  }

  match args.output.format {
    ReportFormat::Summary => {
      for (path, pipeline) in &resolved {
        print_summary(path, pipeline);
      }
    }
    ReportFormat::Json => {
      let pipelines: Vec<_> = resolved.iter().map(|(_, pipeline)| pipeline).collect();
      println!("{}", serde_json::to_string_pretty(&pipelines)?);
    }
  }

  Ok(ok)
}

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "assetpipe=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let args = Commands::parse();
  let silent = args.output.silent;

  let start = Instant::now();
  match run(args) {
    Ok(true) => {
      if !silent {
        let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
        println!(
          "\n{} Resolved in {}",
          Colour::Green.paint("✔"),
          Colour::White.bold().paint(elapsed)
        );
      }
      ExitCode::SUCCESS
    }
    Ok(false) => ExitCode::FAILURE,
    Err(error) => {
      println!("{} {error:#}", Colour::Red.paint("Error:"));
      ExitCode::FAILURE
    }
  }
}
