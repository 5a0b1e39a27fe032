/* src/server/core/rust/src/locale.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FolioError;

/// Supported site locales. English is the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  #[default]
  En,
  Fa,
}

/// Text direction of a locale, rendered into `dir` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Ltr,
  Rtl,
}

impl Direction {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Ltr => "ltr",
      Self::Rtl => "rtl",
    }
  }
}

impl Locale {
  pub const ALL: [Locale; 2] = [Locale::En, Locale::Fa];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::En => "en",
      Self::Fa => "fa",
    }
  }

  pub fn direction(self) -> Direction {
    match self {
      Self::En => Direction::Ltr,
      Self::Fa => Direction::Rtl,
    }
  }

  /// Lenient lookup used by resolution chains: `None` for anything unsupported.
  pub fn from_tag(tag: &str) -> Option<Self> {
    tag.parse().ok()
  }
}

impl FromStr for Locale {
  type Err = FolioError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "en" => Ok(Self::En),
      "fa" => Ok(Self::Fa),
      other => Err(FolioError::not_found(format!("Unsupported locale '{other}'"))),
    }
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
