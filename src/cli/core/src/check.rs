/* src/cli/core/src/check.rs */

use std::path::Path;

use anyhow::{Result, bail};
use folio_server::{BundledSource, DictionarySource, DirSource, Locale};

use crate::ui;

/// Load one locale and count its strings.
pub async fn check_locale(source: &dyn DictionarySource, locale: Locale) -> Result<usize, String> {
  if !source.has(locale).await {
    return Err("missing".to_string());
  }
  let dictionary = source.load(locale).await.map_err(|e| e.to_string())?;
  Ok(dictionary.flatten().len())
}

pub async fn run_check(dir: Option<&Path>) -> Result<()> {
  ui::banner("check");

  let dir_source;
  let source: &dyn DictionarySource = match dir {
    Some(d) => {
      ui::arrow(&format!("reading {}", d.display()));
      dir_source = DirSource::new(d);
      &dir_source
    }
    None => {
      ui::arrow("bundled dictionaries");
      &BundledSource
    }
  };

  let mut failed = 0;
  for locale in Locale::ALL {
    match check_locale(source, locale).await {
      Ok(count) => ui::ok(&format!("{locale}  {count} strings")),
      Err(reason) => {
        failed += 1;
        ui::fail(&format!("{locale}  {reason}"));
      }
    }
  }

  if failed > 0 {
    bail!("{failed} of {} dictionaries failed", Locale::ALL.len());
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn bundled_dictionaries_pass() {
    for locale in Locale::ALL {
      let count = check_locale(&BundledSource, locale).await.unwrap();
      assert!(count > 0);
    }
  }

  #[tokio::test]
  async fn missing_file_reported() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("en.json"), BundledSource::raw(Locale::En)).unwrap();

    let source = DirSource::new(tmp.path());
    assert!(check_locale(&source, Locale::En).await.is_ok());
    assert_eq!(check_locale(&source, Locale::Fa).await.unwrap_err(), "missing");
  }

  #[tokio::test]
  async fn malformed_file_reported() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("fa.json"), "{\"menu\": {}}").unwrap();

    let source = DirSource::new(tmp.path());
    assert!(check_locale(&source, Locale::Fa).await.is_err());
  }

  #[tokio::test]
  async fn run_check_fails_on_empty_dir() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(run_check(Some(tmp.path())).await.is_err());
  }
}
