use std::path::{Component, Path, PathBuf};

use sugar_path::SugarPath;

pub trait PathExt {
  /// Lexically resolves `.` and `..` and drops trailing separators. Never touches the filesystem.
  fn lexical_normalize(&self) -> PathBuf;

  /// Forward-slash form of the normalized path, the shape stored in resolved configs.
  fn to_canonical_slash(&self) -> String;

  /// Whether the normalized path climbs above the directory it is relative to.
  fn escapes_root(&self) -> bool;

  /// Whether either path contains the other, compared component by component.
  fn overlaps(&self, other: &Path) -> bool;
}

impl PathExt for Path {
  fn lexical_normalize(&self) -> PathBuf {
    self.normalize().to_path_buf()
  }

  fn to_canonical_slash(&self) -> String {
    self.lexical_normalize().to_slash_lossy().into_owned()
  }

  fn escapes_root(&self) -> bool {
    matches!(self.lexical_normalize().components().next(), Some(Component::ParentDir))
  }

  fn overlaps(&self, other: &Path) -> bool {
    let this = without_cur_dir(self);
    let other = without_cur_dir(other);
    this.starts_with(&other) || other.starts_with(&this)
  }
}

/// `.` normalizes to a lone `CurDir`; without it the root is an empty path, a prefix of every path.
fn without_cur_dir(path: &Path) -> PathBuf {
  path.lexical_normalize().components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

#[test]
fn test_to_canonical_slash() {
  assert_eq!(Path::new("web/static/").to_canonical_slash(), "web/static");
  assert_eq!(Path::new("./styles").to_canonical_slash(), "styles");
  assert_eq!(Path::new("web/./static/../static").to_canonical_slash(), "web/static");
  assert_eq!(Path::new("../priv/static").to_canonical_slash(), "../priv/static");
}

#[test]
fn test_escapes_root() {
  assert!(Path::new("../priv/static").escapes_root());
  assert!(Path::new("web/../../static").escapes_root());
  assert!(!Path::new("web/../static").escapes_root());
  assert!(!Path::new("priv/static").escapes_root());
}

#[test]
fn test_overlaps() {
  assert!(Path::new("priv/static").overlaps(Path::new("priv/static/")));
  assert!(Path::new("priv").overlaps(Path::new("priv/static")));
  assert!(Path::new("priv/static/css").overlaps(Path::new("priv/static")));
  assert!(!Path::new("priv/static").overlaps(Path::new("priv/statics")));
  assert!(!Path::new("public").overlaps(Path::new("priv/static")));
  assert!(Path::new(".").overlaps(Path::new("priv/static")));
  assert!(Path::new("priv/static").overlaps(Path::new("assets/..")));
  assert!(Path::new("./priv").overlaps(Path::new("priv/static")));
}
