/* src/server/core/rust/src/section.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dictionary::MenuText;
use crate::errors::FolioError;

/// The page regions, in document order. The string form is both the DOM
/// anchor id and the active-section value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
  Home,
  About,
  Resume,
  Skills,
  Projects,
  Services,
  Contact,
}

impl SectionId {
  pub const ALL: [SectionId; 7] = [
    SectionId::Home,
    SectionId::About,
    SectionId::Resume,
    SectionId::Skills,
    SectionId::Projects,
    SectionId::Services,
    SectionId::Contact,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Home => "home",
      Self::About => "about",
      Self::Resume => "resume",
      Self::Skills => "skills",
      Self::Projects => "projects",
      Self::Services => "services",
      Self::Contact => "contact",
    }
  }

  pub fn menu_label(self, menu: &MenuText) -> &str {
    match self {
      Self::Home => &menu.home,
      Self::About => &menu.about,
      Self::Resume => &menu.resume,
      Self::Skills => &menu.skills,
      Self::Projects => &menu.projects,
      Self::Services => &menu.services,
      Self::Contact => &menu.contact,
    }
  }
}

impl FromStr for SectionId {
  type Err = FolioError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|id| id.as_str() == s)
      .ok_or_else(|| FolioError::not_found(format!("Unknown section '{s}'")))
  }
}

impl fmt::Display for SectionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_through_str() {
    for id in SectionId::ALL {
      assert_eq!(id.as_str().parse::<SectionId>().unwrap(), id);
    }
  }

  #[test]
  fn unknown_section() {
    assert!("blog".parse::<SectionId>().is_err());
    assert!("Home".parse::<SectionId>().is_err());
  }

  #[test]
  fn document_order() {
    assert_eq!(SectionId::ALL.first(), Some(&SectionId::Home));
    assert_eq!(SectionId::ALL.last(), Some(&SectionId::Contact));
    assert!(SectionId::About < SectionId::Contact);
  }

  #[test]
  fn menu_label_picks_matching_entry() {
    let menu = MenuText { services: "Services".into(), ..Default::default() };
    assert_eq!(SectionId::Services.menu_label(&menu), "Services");
    assert_eq!(SectionId::Home.menu_label(&menu), "");
  }
}
