use std::path::PathBuf;

use clap::Args;

use crate::types::report_format::ReportFormat;

#[derive(Args)]
pub struct InputArgs {
  /// Configuration files (JSON). Several files are resolved independently and then checked for
  /// overlapping public roots.
  #[clap(required = true, num_args = 1..)]
  pub configs: Vec<PathBuf>,

  /// Project root. Defaults to the current directory.
  #[clap(long)]
  pub root: Option<PathBuf>,

  /// Directory of the configuration relative to the project root. Only valid with a single config;
  /// otherwise each file's own directory is used.
  #[clap(long)]
  pub config_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'f', default_value = "summary")]
  pub format: ReportFormat,

  #[clap(long, short = 's')]
  pub silent: bool,
}
