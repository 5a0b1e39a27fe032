/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::FolioConfig;

pub const CONFIG_FILE: &str = "folio.toml";

/// Walk upward from `start` to find `folio.toml`, like Cargo.toml discovery
pub fn find_folio_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_folio_config(path: &Path) -> Result<FolioConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: FolioConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.i18n.validate()?;
  Ok(config)
}

/// Relative paths in the config are taken from the directory holding it.
pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
  let p = Path::new(path);
  if p.is_absolute() { p.to_path_buf() } else { base_dir.join(p) }
}
