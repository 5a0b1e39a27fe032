/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use folio_server::{Locale, MailConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolioConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub i18n: I18nSection,
  #[serde(default)]
  pub mail: MailSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_public_dir")]
  pub public_dir: String,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port(), public_dir: default_public_dir() }
  }
}

impl ServerSection {
  /// `--port` beats a parseable `PORT`, which beats the file.
  pub fn effective_port(&self, env_port: Option<&str>, flag: Option<u16>) -> u16 {
    flag
      .or_else(|| env_port.and_then(|p| p.trim().parse().ok()))
      .unwrap_or(self.port)
  }
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_public_dir() -> String {
  "public".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct I18nSection {
  #[serde(default = "default_i18n_default")]
  pub default: String,
  /// Directory of `{locale}.json` documents; bundled dictionaries when unset.
  pub dir: Option<String>,
}

impl Default for I18nSection {
  fn default() -> Self {
    Self { default: default_i18n_default(), dir: None }
  }
}

impl I18nSection {
  pub fn validate(&self) -> Result<()> {
    self.default_locale().map(|_| ())
  }

  pub fn default_locale(&self) -> Result<Locale> {
    match Locale::from_tag(&self.default) {
      Some(locale) => Ok(locale),
      None => {
        let supported: Vec<_> = Locale::ALL.iter().map(|l| l.as_str()).collect();
        bail!("i18n.default \"{}\" is not a supported locale {supported:?}", self.default)
      }
    }
  }
}

fn default_i18n_default() -> String {
  "en".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSection {
  #[serde(default = "default_mail_host")]
  pub host: String,
  #[serde(default = "default_mail_port")]
  pub port: u16,
  #[serde(default = "default_subject")]
  pub subject: String,
}

impl Default for MailSection {
  fn default() -> Self {
    Self { host: default_mail_host(), port: default_mail_port(), subject: default_subject() }
  }
}

impl MailSection {
  /// Relay settings without credentials; those only ever come from the environment.
  pub fn to_mail_config(&self) -> MailConfig {
    MailConfig {
      host: self.host.clone(),
      port: self.port,
      subject: self.subject.clone(),
      ..MailConfig::default()
    }
  }
}

fn default_mail_host() -> String {
  folio_server::mail::DEFAULT_SMTP_HOST.to_string()
}

fn default_mail_port() -> u16 {
  folio_server::mail::DEFAULT_SMTP_PORT
}

fn default_subject() -> String {
  folio_server::mail::DEFAULT_SUBJECT.to_string()
}
