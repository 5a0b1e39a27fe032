/* src/server/core/rust/src/projects.rs */

use serde::Serialize;

use crate::dictionary::ProjectDescriptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectKey {
  Todo,
  WeatherApp,
  Khashimelk,
}

/// One showcase card. Titles are not translated; descriptions come from
/// `content.projects.descriptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub key: ProjectKey,
  pub title: &'static str,
  pub video_url: &'static str,
}

pub const PROJECTS: [Project; 3] = [
  Project { key: ProjectKey::Todo, title: "todo app", video_url: "/videos/todo.mp4" },
  Project {
    key: ProjectKey::WeatherApp,
    title: "weather app",
    video_url: "/videos/weather-app.mp4",
  },
  Project { key: ProjectKey::Khashimelk, title: "khashimelk", video_url: "/videos/Khashimelk.mp4" },
];

impl Project {
  pub fn description<'a>(&self, text: &'a ProjectDescriptions) -> &'a str {
    match self.key {
      ProjectKey::Todo => &text.todo,
      ProjectKey::WeatherApp => &text.weather_app,
      ProjectKey::Khashimelk => &text.khashimelk,
    }
  }

  /// Dotted dictionary key of the description.
  pub fn description_key(&self) -> &'static str {
    match self.key {
      ProjectKey::Todo => "content.projects.descriptions.todo",
      ProjectKey::WeatherApp => "content.projects.descriptions.weatherApp",
      ProjectKey::Khashimelk => "content.projects.descriptions.khashimelk",
    }
  }
}

/// Tracks which showcase video is playing so that at most one plays at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDeck {
  playing: Option<usize>,
}

impl VideoDeck {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn playing(&self) -> Option<usize> {
    self.playing
  }

  /// Video `index` started playing. Returns the video that must be paused, if any.
  pub fn play(&mut self, index: usize) -> Option<usize> {
    let previous = self.playing.replace(index);
    previous.filter(|&prev| prev != index)
  }

  /// Video `index` was paused or ended on its own.
  pub fn stopped(&mut self, index: usize) {
    if self.playing == Some(index) {
      self.playing = None;
    }
  }
}
