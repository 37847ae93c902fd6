mod resolver;
mod utils;

pub use crate::{
  resolver::{resolve, ConfigResolver},
  utils::{
    check_public_roots::check_public_roots,
    merge_config::{
      default_config, merge_config, DEFAULT_ASSETS_PATTERN, DEFAULT_PUBLIC_ROOT, DEFAULT_WATCHED,
    },
  },
};
pub use assetpipe_common::*;
pub use assetpipe_error::{ConfigDiagnostic, ConfigError, ConfigErrorKind, ConfigResult};
