/* src/server/core/rust/src/theme.rs */

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::FolioError;

/// Color scheme picked with the menu's mode toggle. `System` leaves the choice
/// to the client's `prefers-color-scheme`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  Light,
  Dark,
  #[default]
  System,
}

impl Theme {
  pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
      Self::System => "system",
    }
  }

  /// Class put on `<html>`. `System` has none until the client resolves it.
  pub fn html_class(self) -> Option<&'static str> {
    match self {
      Self::Light => Some("light"),
      Self::Dark => Some("dark"),
      Self::System => None,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Light => "Light",
      Self::Dark => "Dark",
      Self::System => "System",
    }
  }

  pub fn from_tag(tag: &str) -> Option<Self> {
    tag.parse().ok()
  }
}

impl FromStr for Theme {
  type Err = FolioError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      "system" => Ok(Self::System),
      other => Err(FolioError::validation(format!("Unknown theme '{other}'"))),
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
