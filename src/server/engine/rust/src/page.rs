/* src/server/engine/rust/src/page.rs */

//! Page inputs and the hydration data handed to the client script.

use folio_server::map::{MARKER_POPUP, TILE_ATTRIBUTION, TILE_URL};
use folio_server::reveal::RevealSpec;
use folio_server::scroll::SMOOTH_SCROLL_DURATION;
use folio_server::slider::SLIDE_INTERVAL;
use folio_server::{
  ACTIVE_THRESHOLD, Carousel, Dictionary, Locale, MapState, PROJECTS, Project, SLIDES, SectionId,
  THEME_COOKIE, THEME_PARAM, Theme,
};
use serde::Serialize;

use crate::escape::ascii_escape_json;

/// Element id of the JSON data script.
pub const DATA_ID: &str = "__FOLIO_DATA__";
pub const SITE_TITLE: &str = "realmehrshad.ir";
pub const SITE_DESCRIPTION: &str = "personal blog of mehrshad moradi";
pub const PORTRAIT_SRC: &str = "/images/me.jpg";
pub const RESUME_HREF: &str = "/resume/Mehrshad-Moradi-CV.pdf";
pub const RESUME_DOWNLOAD_NAME: &str = "Mehrshad-Moradi-Frontend-CV.pdf";
pub const SKILL_ICONS_SRC: &str = "https://skillicons.dev/icons?i=html,css,bootstrap,tailwind,\
  javascript,ts,less,react,nextjs,git,github,bitbucket,gitlab,angular";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
  pub label: &'static str,
  pub href: &'static str,
  pub icon: &'static str,
  /// Opens in a new tab.
  pub external: bool,
}

pub const SOCIAL_LINKS: [SocialLink; 5] = [
  SocialLink {
    label: "Github",
    href: "https://github.com/mehrshadmoradi",
    icon: "/images/github.png",
    external: true,
  },
  SocialLink {
    label: "Linkedin",
    href: "https://www.linkedin.com/in/mehrshadmoradi/",
    icon: "/images/linkedin.png",
    external: true,
  },
  SocialLink {
    label: "Youtube",
    href: "https://www.youtube.com/@reallmehrshad",
    icon: "/images/youtube.png",
    external: true,
  },
  SocialLink {
    label: "Gmail",
    href: "mailto:mehrshadmoradi2079@gmail.com",
    icon: "/images/gmail.png",
    external: false,
  },
  SocialLink { label: "Call", href: "tel:09909066113", icon: "/images/call.png", external: false },
];

/// Everything a page render needs.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
  pub locale: Locale,
  pub dictionary: &'a Dictionary,
  /// Section highlighted in the menu on first paint.
  pub active: SectionId,
  /// Request path, used to build the language switcher links.
  pub path: &'a str,
  pub theme: Theme,
}

impl<'a> PageContext<'a> {
  pub fn new(locale: Locale, dictionary: &'a Dictionary, path: &'a str) -> Self {
    Self { locale, dictionary, active: SectionId::Home, path, theme: Theme::System }
  }

  pub fn with_theme(mut self, theme: Theme) -> Self {
    self.theme = theme;
    self
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapData {
  #[serde(flatten)]
  state: MapState,
  tile_url: &'static str,
  attribution: &'static str,
  popup: &'static str,
}

/// Client hydration payload: observer settings, the reveal table and the
/// widget initial states.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioData {
  locale: Locale,
  dir: &'static str,
  theme: Theme,
  theme_cookie: &'static str,
  theme_param: &'static str,
  active_section: SectionId,
  sections: [SectionId; 7],
  threshold: f64,
  smooth_scroll_seconds: f64,
  reveals: Vec<RevealSpec>,
  slides: [&'static str; 5],
  slide_interval_ms: u64,
  initial_slide: usize,
  projects: [Project; 3],
  map: MapData,
}

pub fn build_folio_data(ctx: &PageContext<'_>) -> FolioData {
  FolioData {
    locale: ctx.locale,
    dir: ctx.locale.direction().as_str(),
    theme: ctx.theme,
    theme_cookie: THEME_COOKIE,
    theme_param: THEME_PARAM,
    active_section: ctx.active,
    sections: SectionId::ALL,
    threshold: ACTIVE_THRESHOLD,
    smooth_scroll_seconds: SMOOTH_SCROLL_DURATION,
    reveals: folio_server::page_reveals(),
    slides: SLIDES,
    slide_interval_ms: SLIDE_INTERVAL.as_millis() as u64,
    initial_slide: Carousel::default().current(),
    projects: PROJECTS,
    map: MapData {
      state: MapState::default(),
      tile_url: TILE_URL,
      attribution: TILE_ATTRIBUTION,
      popup: MARKER_POPUP,
    },
  }
}

/// `<script id=... type="application/json">` with ASCII-escaped JSON.
pub fn data_script(data: &FolioData) -> String {
  let json = serde_json::to_string(data).unwrap_or_default();
  let escaped = ascii_escape_json(&json);
  format!(r#"<script id="{DATA_ID}" type="application/json">{escaped}</script>"#)
}
