/* src/server/core/rust/src/dictionary/source.rs */

use std::path::{Path, PathBuf};

use super::Dictionary;
use crate::BoxFuture;
use crate::errors::FolioError;
use crate::locale::Locale;

const BUNDLED_EN: &str = include_str!("../../locales/en.json");
const BUNDLED_FA: &str = include_str!("../../locales/fa.json");

/// Where locale documents come from. `has` answers whether a document is
/// registered for a locale; `load` reads and validates it. Both run on the
/// request path, so neither may block.
pub trait DictionarySource: Send + Sync {
  fn kind(&self) -> &'static str;
  fn has(&self, locale: Locale) -> BoxFuture<'_, bool>;
  fn load(&self, locale: Locale) -> BoxFuture<'_, Result<Dictionary, FolioError>>;
}

/// Documents compiled into the binary; every supported locale is registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl BundledSource {
  pub fn raw(locale: Locale) -> &'static str {
    match locale {
      Locale::En => BUNDLED_EN,
      Locale::Fa => BUNDLED_FA,
    }
  }
}

impl DictionarySource for BundledSource {
  fn kind(&self) -> &'static str {
    "bundled"
  }

  fn has(&self, _locale: Locale) -> BoxFuture<'_, bool> {
    Box::pin(async { true })
  }

  fn load(&self, locale: Locale) -> BoxFuture<'_, Result<Dictionary, FolioError>> {
    Box::pin(async move { Dictionary::from_json(locale, Self::raw(locale)) })
  }
}

/// `{dir}/{locale}.json` read on every load. A locale is registered when its
/// file exists.
#[derive(Debug, Clone)]
pub struct DirSource {
  dir: PathBuf,
}

impl DirSource {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, locale: Locale) -> PathBuf {
    self.dir.join(format!("{locale}.json"))
  }
}

impl DictionarySource for DirSource {
  fn kind(&self) -> &'static str {
    "dir"
  }

  fn has(&self, locale: Locale) -> BoxFuture<'_, bool> {
    let path = self.path_for(locale);
    Box::pin(async move {
      match tokio::fs::metadata(&path).await {
        Ok(meta) => meta.is_file(),
        Err(_) => false,
      }
    })
  }

  fn load(&self, locale: Locale) -> BoxFuture<'_, Result<Dictionary, FolioError>> {
    let path = self.path_for(locale);
    Box::pin(async move {
      let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| FolioError::dictionary(format!("read {}: {e}", path.display())))?;
      Dictionary::from_json(locale, &content)
    })
  }
}
