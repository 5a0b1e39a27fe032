/* src/server/core/rust/src/server.rs */

use std::path::PathBuf;
use std::sync::Arc;

use crate::dictionary::{BundledSource, DictionarySource, LocaleResolver};
use crate::locale::Locale;
use crate::mail::{Mailer, SmtpMailer};

/// Framework-agnostic parts extracted from `FolioServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct FolioParts {
  pub resolver: LocaleResolver,
  pub mailer: Arc<dyn Mailer>,
  pub public_dir: Option<PathBuf>,
}

impl FolioParts {
  pub fn default_locale(&self) -> Locale {
    self.resolver.default_locale()
  }
}

pub struct FolioServer {
  source: Arc<dyn DictionarySource>,
  default_locale: Locale,
  mailer: Option<Arc<dyn Mailer>>,
  public_dir: Option<PathBuf>,
}

impl FolioServer {
  pub fn new() -> Self {
    Self {
      source: Arc::new(BundledSource),
      default_locale: Locale::default(),
      mailer: None,
      public_dir: None,
    }
  }

  pub fn dictionary_source(mut self, source: impl DictionarySource + 'static) -> Self {
    self.source = Arc::new(source);
    self
  }

  pub fn default_locale(mut self, locale: Locale) -> Self {
    self.default_locale = locale;
    self
  }

  pub fn mailer(mut self, mailer: impl Mailer + 'static) -> Self {
    self.mailer = Some(Arc::new(mailer));
    self
  }

  /// Directory served for every path that is not a page or API route.
  pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.public_dir = Some(dir.into());
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  /// Without an explicit mailer, SMTP credentials are read from the environment.
  pub fn into_parts(self) -> FolioParts {
    let mailer = self.mailer.unwrap_or_else(|| Arc::new(SmtpMailer::from_env()));
    FolioParts {
      resolver: LocaleResolver::new(self.source).with_default(self.default_locale),
      mailer,
      public_dir: self.public_dir,
    }
  }
}

impl Default for FolioServer {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_bundled_english() {
    let parts = FolioServer::new().into_parts();
    assert_eq!(parts.default_locale(), Locale::En);
    assert_eq!(parts.resolver.source_kind(), "bundled");
    assert!(parts.public_dir.is_none());
  }

  #[test]
  fn builder_overrides() {
    let parts = FolioServer::new()
      .dictionary_source(crate::dictionary::DirSource::new("locales"))
      .default_locale(Locale::Fa)
      .public_dir("public")
      .into_parts();
    assert_eq!(parts.default_locale(), Locale::Fa);
    assert_eq!(parts.resolver.source_kind(), "dir");
    assert_eq!(parts.public_dir.as_deref(), Some(std::path::Path::new("public")));
  }
}
