/* src/server/core/rust/src/reveal.rs */

//! Scroll-triggered reveal animations.
//!
//! A trigger watches one element's top edge against a band of the viewport
//! (start line at 80% of the viewport height, end line at 20%). Crossing the
//! band's lines fires enter/leave events, and each event maps to a toggle
//! action that drives a tween timeline.

use serde::Serialize;

use crate::observer::{Bounds, Viewport};
use crate::section::SectionId;

/// Child nodes of a section that fade in with it.
pub const TEXT_SELECTOR: &str = "h1, h2, p, li, form, a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ease {
  #[serde(rename = "none")]
  Linear,
  #[serde(rename = "power1.out")]
  Power1Out,
  #[serde(rename = "power2.out")]
  Power2Out,
}

impl Ease {
  pub fn apply(self, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match self {
      Self::Linear => t,
      Self::Power1Out => 1.0 - (1.0 - t).powi(2),
      Self::Power2Out => 1.0 - (1.0 - t).powi(3),
    }
  }
}

/// Animated properties: opacity plus a translate offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
  pub opacity: f64,
  pub x: f64,
  pub y: f64,
}

impl Pose {
  pub const REST: Pose = Pose { opacity: 1.0, x: 0.0, y: 0.0 };

  pub fn lerp(from: Pose, to: Pose, t: f64) -> Pose {
    let mix = |a: f64, b: f64| a + (b - a) * t;
    Pose { opacity: mix(from.opacity, to.opacity), x: mix(from.x, to.x), y: mix(from.y, to.y) }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tween {
  pub from: Pose,
  pub to: Pose,
  /// Seconds per target.
  pub duration: f64,
  /// Seconds between consecutive targets starting.
  pub stagger: f64,
  pub ease: Ease,
}

impl Tween {
  pub fn total_duration(&self, targets: usize) -> f64 {
    self.duration + self.stagger * targets.saturating_sub(1) as f64
  }

  pub fn pose_at(&self, playhead: f64, index: usize) -> Pose {
    let local = if self.duration <= 0.0 {
      if playhead >= self.stagger * index as f64 { 1.0 } else { 0.0 }
    } else {
      (playhead - self.stagger * index as f64) / self.duration
    };
    Pose::lerp(self.from, self.to, self.ease.apply(local))
  }
}

/// Where the trigger's top edge must sit, as fractions of the viewport height
/// measured from the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollBand {
  pub start: f64,
  pub end: f64,
}

impl ScrollBand {
  /// Scroll offsets at which the band starts and ends for a trigger at `trigger_top`.
  pub fn scroll_range(&self, trigger_top: f64, viewport_height: f64) -> (f64, f64) {
    (trigger_top - self.start * viewport_height, trigger_top - self.end * viewport_height)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
  None,
  Play,
  Pause,
  Reverse,
  Restart,
  Reset,
  Complete,
}

/// Actions for onEnter, onLeave, onEnterBack and onLeaveBack, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleActions {
  pub on_enter: ToggleAction,
  pub on_leave: ToggleAction,
  pub on_enter_back: ToggleAction,
  pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
  /// "play none none reverse"
  fn default() -> Self {
    Self {
      on_enter: ToggleAction::Play,
      on_leave: ToggleAction::None,
      on_enter_back: ToggleAction::None,
      on_leave_back: ToggleAction::Reverse,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
  Enter,
  Leave,
  EnterBack,
  LeaveBack,
}

/// Which element a reveal targets on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "section", rename_all = "snake_case")]
pub enum RevealTarget {
  SectionText(SectionId),
  Portrait,
  Map,
}

impl RevealTarget {
  /// CSS selector of the trigger element.
  pub fn trigger_selector(self) -> String {
    match self {
      Self::SectionText(id) => format!("#{id}"),
      Self::Portrait => "#portrait".to_string(),
      Self::Map => "#map".to_string(),
    }
  }

  /// CSS selector of the animated nodes, relative to the trigger.
  pub fn target_selector(self) -> &'static str {
    match self {
      Self::SectionText(_) => TEXT_SELECTOR,
      Self::Portrait | Self::Map => ":scope",
    }
  }

  pub fn section(self) -> SectionId {
    match self {
      Self::SectionText(id) => id,
      Self::Portrait => SectionId::About,
      Self::Map => SectionId::Contact,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealSpec {
  pub target: RevealTarget,
  pub tween: Tween,
  pub band: ScrollBand,
  pub actions: ToggleActions,
}

impl RevealSpec {
  /// Section text: fade up 50px, staggered.
  pub fn section_text(section: SectionId) -> Self {
    Self {
      target: RevealTarget::SectionText(section),
      tween: Tween {
        from: Pose { opacity: 0.0, x: 0.0, y: 50.0 },
        to: Pose::REST,
        duration: 1.5,
        stagger: 0.2,
        ease: Ease::Power1Out,
      },
      band: ScrollBand { start: 0.8, end: 0.2 },
      actions: ToggleActions::default(),
    }
  }

  /// About-section portrait: slide in from the left.
  pub fn portrait() -> Self {
    Self {
      target: RevealTarget::Portrait,
      tween: Tween {
        from: Pose { opacity: 0.0, x: -100.0, y: 0.0 },
        to: Pose::REST,
        duration: 1.5,
        stagger: 0.0,
        ease: Ease::Power2Out,
      },
      band: ScrollBand { start: 0.8, end: 0.5 },
      actions: ToggleActions::default(),
    }
  }

  /// Contact-section map: fade up 75px.
  pub fn map() -> Self {
    Self {
      target: RevealTarget::Map,
      tween: Tween {
        from: Pose { opacity: 0.0, x: 0.0, y: 75.0 },
        to: Pose::REST,
        duration: 1.5,
        stagger: 0.0,
        ease: Ease::Power2Out,
      },
      band: ScrollBand { start: 0.8, end: 0.2 },
      actions: ToggleActions::default(),
    }
  }
}

/// Every reveal the page registers: one text reveal per section plus the
/// portrait and the map.
pub fn page_reveals() -> Vec<RevealSpec> {
  let mut specs: Vec<RevealSpec> =
    SectionId::ALL.into_iter().map(RevealSpec::section_text).collect();
  specs.push(RevealSpec::portrait());
  specs.push(RevealSpec::map());
  specs
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
  Before,
  Inside,
  After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
  Paused,
  Forward,
  Backward,
}

/// One trigger bound to a tween over `targets` nodes.
#[derive(Debug, Clone)]
pub struct RevealTimeline {
  spec: RevealSpec,
  trigger_top: f64,
  targets: usize,
  zone: Zone,
  playhead: f64,
  playback: Playback,
  killed: bool,
}

impl RevealTimeline {
  /// Targets start at the tween's `from` pose.
  pub fn new(spec: RevealSpec, trigger: Bounds, targets: usize) -> Self {
    Self {
      spec,
      trigger_top: trigger.top,
      targets: targets.max(1),
      zone: Zone::Before,
      playhead: 0.0,
      playback: Playback::Paused,
      killed: false,
    }
  }

  pub fn spec(&self) -> &RevealSpec {
    &self.spec
  }

  pub fn playback(&self) -> Playback {
    self.playback
  }

  pub fn is_killed(&self) -> bool {
    self.killed
  }

  /// Stop reacting to scroll and freeze the playhead.
  pub fn kill(&mut self) {
    self.killed = true;
    self.playback = Playback::Paused;
  }

  pub fn duration(&self) -> f64 {
    self.spec.tween.total_duration(self.targets)
  }

  pub fn progress(&self) -> f64 {
    let total = self.duration();
    if total <= 0.0 { 1.0 } else { self.playhead / total }
  }

  pub fn pose(&self, index: usize) -> Pose {
    self.spec.tween.pose_at(self.playhead, index)
  }

  /// Feed a scroll position; returns the band events it crossed. Jumping over
  /// the whole band fires both events of that direction in order.
  pub fn on_scroll(&mut self, viewport: Viewport) -> Vec<TriggerEvent> {
    if self.killed {
      return Vec::new();
    }
    let (start, end) = self.spec.band.scroll_range(self.trigger_top, viewport.height);
    let zone = if viewport.scroll_top < start {
      Zone::Before
    } else if viewport.scroll_top > end {
      Zone::After
    } else {
      Zone::Inside
    };

    let events = match (self.zone, zone) {
      (Zone::Before, Zone::Inside) => vec![TriggerEvent::Enter],
      (Zone::Before, Zone::After) => vec![TriggerEvent::Enter, TriggerEvent::Leave],
      (Zone::Inside, Zone::After) => vec![TriggerEvent::Leave],
      (Zone::After, Zone::Inside) => vec![TriggerEvent::EnterBack],
      (Zone::After, Zone::Before) => vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack],
      (Zone::Inside, Zone::Before) => vec![TriggerEvent::LeaveBack],
      _ => Vec::new(),
    };
    self.zone = zone;

    for event in &events {
      let action = match event {
        TriggerEvent::Enter => self.spec.actions.on_enter,
        TriggerEvent::Leave => self.spec.actions.on_leave,
        TriggerEvent::EnterBack => self.spec.actions.on_enter_back,
        TriggerEvent::LeaveBack => self.spec.actions.on_leave_back,
      };
      self.apply(action);
    }
    events
  }

  fn apply(&mut self, action: ToggleAction) {
    match action {
      ToggleAction::None => {}
      ToggleAction::Play => self.playback = Playback::Forward,
      ToggleAction::Reverse => self.playback = Playback::Backward,
      ToggleAction::Pause => self.playback = Playback::Paused,
      ToggleAction::Restart => {
        self.playhead = 0.0;
        self.playback = Playback::Forward;
      }
      ToggleAction::Reset => {
        self.playhead = 0.0;
        self.playback = Playback::Paused;
      }
      ToggleAction::Complete => {
        self.playhead = self.duration();
        self.playback = Playback::Paused;
      }
    }
  }

  /// Move the playhead by `dt` seconds in the current direction.
  pub fn advance(&mut self, dt: f64) {
    let total = self.duration();
    match self.playback {
      Playback::Paused => {}
      Playback::Forward => {
        self.playhead = (self.playhead + dt).min(total);
        if self.playhead >= total {
          self.playback = Playback::Paused;
        }
      }
      Playback::Backward => {
        self.playhead = (self.playhead - dt).max(0.0);
        if self.playhead <= 0.0 {
          self.playback = Playback::Paused;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const VH: f64 = 1000.0;

  fn text_timeline() -> RevealTimeline {
    // Trigger top at 2000: band runs from scroll 1200 to 1800.
    RevealTimeline::new(RevealSpec::section_text(SectionId::Resume), Bounds::new(2000.0, 900.0), 3)
  }

  fn at(scroll: f64) -> Viewport {
    Viewport::new(scroll, VH)
  }

  #[test]
  fn ease_endpoints() {
    for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2Out] {
      assert_eq!(ease.apply(0.0), 0.0);
      assert_eq!(ease.apply(1.0), 1.0);
    }
    assert_eq!(Ease::Power1Out.apply(0.5), 0.75);
    assert_eq!(Ease::Power2Out.apply(0.5), 0.875);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
  }

  #[test]
  fn band_scroll_range() {
    let band = ScrollBand { start: 0.8, end: 0.2 };
    assert_eq!(band.scroll_range(2000.0, VH), (1200.0, 1800.0));
  }

  #[test]
  fn stagger_extends_duration() {
    let tween = RevealSpec::section_text(SectionId::About).tween;
    assert!((tween.total_duration(3) - 1.9).abs() < 1e-9);
    assert_eq!(tween.total_duration(0), 1.5);
  }

  #[test]
  fn starts_hidden() {
    let tl = text_timeline();
    assert_eq!(tl.pose(0), Pose { opacity: 0.0, x: 0.0, y: 50.0 });
    assert_eq!(tl.playback(), Playback::Paused);
  }

  #[test]
  fn entering_band_plays_forward_to_rest() {
    let mut tl = text_timeline();
    assert!(tl.on_scroll(at(1000.0)).is_empty());
    assert_eq!(tl.on_scroll(at(1300.0)), vec![TriggerEvent::Enter]);
    assert_eq!(tl.playback(), Playback::Forward);

    tl.advance(0.5);
    let first = tl.pose(0);
    let last = tl.pose(2);
    assert!(first.opacity > last.opacity, "stagger delays later targets");

    tl.advance(5.0);
    assert_eq!(tl.progress(), 1.0);
    for i in 0..3 {
      assert_eq!(tl.pose(i), Pose::REST);
    }
    assert_eq!(tl.playback(), Playback::Paused);
  }

  #[test]
  fn leaving_forward_and_entering_back_do_nothing() {
    let mut tl = text_timeline();
    tl.on_scroll(at(1300.0));
    tl.advance(5.0);
    assert_eq!(tl.on_scroll(at(1900.0)), vec![TriggerEvent::Leave]);
    assert_eq!(tl.on_scroll(at(1500.0)), vec![TriggerEvent::EnterBack]);
    assert_eq!(tl.playback(), Playback::Paused);
    assert_eq!(tl.progress(), 1.0);
  }

  #[test]
  fn scrolling_back_above_band_reverses() {
    let mut tl = text_timeline();
    tl.on_scroll(at(1300.0));
    tl.advance(5.0);
    assert_eq!(tl.on_scroll(at(1100.0)), vec![TriggerEvent::LeaveBack]);
    assert_eq!(tl.playback(), Playback::Backward);
    tl.advance(5.0);
    assert_eq!(tl.progress(), 0.0);
    assert_eq!(tl.pose(0).opacity, 0.0);
  }

  #[test]
  fn jump_over_band_fires_both_events() {
    let mut tl = text_timeline();
    assert_eq!(tl.on_scroll(at(5000.0)), vec![TriggerEvent::Enter, TriggerEvent::Leave]);
    assert_eq!(tl.playback(), Playback::Forward);
    assert_eq!(tl.on_scroll(at(0.0)), vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]);
    assert_eq!(tl.playback(), Playback::Backward);
  }

  #[test]
  fn killed_timeline_ignores_scroll() {
    let mut tl = text_timeline();
    tl.kill();
    assert!(tl.on_scroll(at(1300.0)).is_empty());
    tl.advance(1.0);
    assert_eq!(tl.progress(), 0.0);
    assert!(tl.is_killed());
  }

  #[test]
  fn portrait_band_ends_at_half() {
    let spec = RevealSpec::portrait();
    assert_eq!(spec.band.end, 0.5);
    assert_eq!(spec.tween.from.x, -100.0);
    assert_eq!(spec.target.section(), SectionId::About);
  }

  #[test]
  fn restart_and_complete_actions() {
    let mut spec = RevealSpec::map();
    spec.actions = ToggleActions {
      on_enter: ToggleAction::Restart,
      on_leave: ToggleAction::None,
      on_enter_back: ToggleAction::Complete,
      on_leave_back: ToggleAction::None,
    };
    let mut tl = RevealTimeline::new(spec, Bounds::new(2000.0, 400.0), 1);
    tl.on_scroll(at(1300.0));
    tl.advance(0.3);
    tl.on_scroll(at(1900.0));
    tl.on_scroll(at(1500.0));
    assert_eq!(tl.progress(), 1.0);
    assert_eq!(tl.playback(), Playback::Paused);
  }

  #[test]
  fn page_table_covers_every_section() {
    let specs = page_reveals();
    assert_eq!(specs.len(), SectionId::ALL.len() + 2);
    assert_eq!(specs[0].target.trigger_selector(), "#home");
    assert_eq!(specs[0].target.target_selector(), TEXT_SELECTOR);
  }
}
