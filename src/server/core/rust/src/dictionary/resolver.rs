/* src/server/core/rust/src/dictionary/resolver.rs */

use std::sync::Arc;

use super::{Dictionary, DictionarySource};
use crate::errors::FolioError;
use crate::locale::Locale;

/// A dictionary together with the locale it was actually loaded for.
#[derive(Debug, Clone)]
pub struct Resolved {
  pub locale: Locale,
  /// True when the requested tag had no registered document.
  pub fell_back: bool,
  pub dictionary: Dictionary,
}

/// Maps a language tag to its dictionary, falling back to the default locale
/// when the tag is unknown or has no registered document. There is no cache:
/// every call loads from the source again.
#[derive(Clone)]
pub struct LocaleResolver {
  source: Arc<dyn DictionarySource>,
  default: Locale,
}

impl LocaleResolver {
  pub fn new(source: Arc<dyn DictionarySource>) -> Self {
    Self { source, default: Locale::default() }
  }

  pub fn with_default(mut self, locale: Locale) -> Self {
    self.default = locale;
    self
  }

  pub fn default_locale(&self) -> Locale {
    self.default
  }

  pub fn source_kind(&self) -> &'static str {
    self.source.kind()
  }

  /// The locale whose document `resolve(tag)` will load.
  pub async fn effective_locale(&self, tag: &str) -> Locale {
    match Locale::from_tag(tag) {
      Some(locale) if self.source.has(locale).await => locale,
      _ => self.default,
    }
  }

  /// Load the dictionary for `tag`. A registered locale that fails to load is
  /// an error, not a fallback; only unregistered tags fall back.
  pub async fn resolve(&self, tag: &str) -> Result<Resolved, FolioError> {
    let locale = self.effective_locale(tag).await;
    let fell_back = Locale::from_tag(tag) != Some(locale);
    if fell_back {
      tracing::warn!(tag, fallback = %locale, "no dictionary registered for tag, using default");
    }
    let dictionary = self.source.load(locale).await?;
    Ok(Resolved { locale, fell_back, dictionary })
  }

  /// Like `resolve`, but a failed load leaves the caller with the blank
  /// placeholder dictionary.
  pub async fn resolve_or_placeholder(&self, tag: &str) -> Resolved {
    match self.resolve(tag).await {
      Ok(resolved) => resolved,
      Err(e) => {
        tracing::error!(tag, error = %e, "dictionary load failed, rendering placeholder text");
        Resolved {
          locale: self.effective_locale(tag).await,
          fell_back: false,
          dictionary: Dictionary::default(),
        }
      }
    }
  }
}
