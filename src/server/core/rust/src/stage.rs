/* src/server/core/rust/src/stage.rs */

//! The content body as mounted on a page: observed sections, their reveal
//! timelines, the active-section value, any in-flight smooth scroll and the
//! widget state (mobile menu, hero carousel, video deck).
//! Mounting acquires everything; unmounting (or dropping) releases it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::observer::{Bounds, SectionObserver, Subscription, Viewport};
use crate::reveal::{RevealSpec, RevealTarget, RevealTimeline, page_reveals};
use crate::scroll::{SmoothScroll, scroll_target};
use crate::errors::FolioError;
use crate::projects::VideoDeck;
use crate::section::SectionId;
use crate::slider::Carousel;

/// Laid-out box of one section plus how many text nodes it reveals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
  pub id: SectionId,
  pub bounds: Bounds,
  pub text_nodes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
  pub sections: Vec<SectionLayout>,
  pub portrait: Option<Bounds>,
  pub map: Option<Bounds>,
  pub viewport_height: f64,
}

impl PageLayout {
  /// Sections stacked top to bottom with the given heights; portrait and map
  /// sit at the top of their sections.
  pub fn stacked(heights: &[(SectionId, f64)], viewport_height: f64) -> Self {
    let mut top = 0.0;
    let mut sections = Vec::with_capacity(heights.len());
    for &(id, height) in heights {
      sections.push(SectionLayout { id, bounds: Bounds::new(top, height), text_nodes: 4 });
      top += height;
    }
    let anchor = |id: SectionId| {
      sections.iter().find(|s| s.id == id).map(|s| Bounds::new(s.bounds.top, s.bounds.height / 2.0))
    };
    let portrait = anchor(SectionId::About);
    let map = anchor(SectionId::Contact);
    Self { sections, portrait, map, viewport_height }
  }

  fn trigger_for(&self, target: RevealTarget) -> Option<(Bounds, usize)> {
    match target {
      RevealTarget::SectionText(id) => {
        self.sections.iter().find(|s| s.id == id).map(|s| (s.bounds, s.text_nodes))
      }
      RevealTarget::Portrait => self.portrait.map(|b| (b, 1)),
      RevealTarget::Map => self.map.map(|b| (b, 1)),
    }
  }
}

pub struct PageStage {
  observer: SectionObserver,
  timelines: Vec<RevealTimeline>,
  active: Rc<Cell<SectionId>>,
  _active_subscription: Subscription,
  viewport: Viewport,
  scroll: Option<SmoothScroll>,
  menu_open: bool,
  carousel: Carousel,
  videos: VideoDeck,
}

impl PageStage {
  /// Observe every laid-out section, create its timelines, and process the
  /// initial scroll position.
  pub fn mount(layout: &PageLayout, scroll_top: f64) -> Self {
    let mut observer = SectionObserver::new();
    for section in &layout.sections {
      observer.observe(section.id, section.bounds);
    }

    let timelines = page_reveals()
      .into_iter()
      .filter_map(|spec: RevealSpec| {
        layout
          .trigger_for(spec.target)
          .map(|(bounds, targets)| RevealTimeline::new(spec, bounds, targets))
      })
      .collect();

    let active = Rc::new(Cell::new(SectionId::Home));
    let sink = active.clone();
    let active_subscription = observer.subscribe(move |id| sink.set(id));

    let viewport = Viewport::new(scroll_top, layout.viewport_height);
    let mut stage = Self {
      observer,
      timelines,
      active,
      _active_subscription: active_subscription,
      viewport,
      scroll: None,
      menu_open: false,
      carousel: Carousel::default(),
      videos: VideoDeck::new(),
    };
    stage.feed(viewport);
    stage
  }

  pub fn active(&self) -> SectionId {
    self.active.get()
  }

  pub fn viewport(&self) -> Viewport {
    self.viewport
  }

  /// Extra listener for active-section reports (the navigation menu).
  pub fn subscribe(&self, callback: impl FnMut(SectionId) + 'static) -> Subscription {
    self.observer.subscribe(callback)
  }

  pub fn is_observing(&self, id: SectionId) -> bool {
    self.observer.is_observing(id)
  }

  pub fn timelines(&self) -> &[RevealTimeline] {
    &self.timelines
  }

  pub fn timelines_for(&self, id: SectionId) -> usize {
    self.timelines.iter().filter(|t| t.spec().target.section() == id).count()
  }

  /// Menu click: mark `id` active right away and start a smooth scroll to its
  /// top edge. Returns the target offset, or `None` if the section is not mounted.
  pub fn scroll_to(&mut self, id: SectionId) -> Option<f64> {
    let bounds = self.observer.bounds_of(id)?;
    self.active.set(id);
    let target = scroll_target(bounds, self.observer.document_height(), self.viewport.height);
    self.scroll = Some(SmoothScroll::new(self.viewport.scroll_top, target));
    Some(target)
  }

  /// Menu link click: collapse the mobile menu, then scroll.
  pub fn navigate(&mut self, id: SectionId) -> Option<f64> {
    self.menu_open = false;
    self.scroll_to(id)
  }

  pub fn toggle_menu(&mut self) -> bool {
    self.menu_open = !self.menu_open;
    self.menu_open
  }

  pub fn is_menu_open(&self) -> bool {
    self.menu_open
  }

  pub fn carousel(&self) -> &Carousel {
    &self.carousel
  }

  /// Bullet click on the hero slider.
  pub fn select_slide(&mut self, index: usize) -> Result<(), FolioError> {
    self.carousel.select(index)
  }

  /// A showcase video started. Returns the one to pause, if another was playing.
  pub fn play_video(&mut self, index: usize) -> Option<usize> {
    self.videos.play(index)
  }

  pub fn video_stopped(&mut self, index: usize) {
    self.videos.stopped(index);
  }

  pub fn playing_video(&self) -> Option<usize> {
    self.videos.playing()
  }

  pub fn is_scrolling(&self) -> bool {
    self.scroll.is_some()
  }

  /// User-driven scroll. Cancels any smooth scroll in flight.
  pub fn scroll_by_user(&mut self, scroll_top: f64) {
    self.scroll = None;
    self.feed(Viewport::new(scroll_top, self.viewport.height));
  }

  /// Advance time by `dt` seconds: step the smooth scroll (if any), the
  /// timelines and the carousel.
  pub fn tick(&mut self, dt: f64) {
    self.carousel.tick(Duration::try_from_secs_f64(dt).unwrap_or_default());
    if let Some(mut scroll) = self.scroll.take() {
      let pos = scroll.step(dt);
      if !scroll.is_finished() {
        self.scroll = Some(scroll);
      }
      self.feed(Viewport::new(pos, self.viewport.height));
    }
    for timeline in &mut self.timelines {
      timeline.advance(dt);
    }
  }

  /// Tear down one section: it is no longer observed and its timelines are killed and dropped.
  pub fn unmount_section(&mut self, id: SectionId) {
    self.observer.unobserve(id);
    for timeline in &mut self.timelines {
      if timeline.spec().target.section() == id {
        timeline.kill();
      }
    }
    self.timelines.retain(|t| !t.is_killed());
    if id == SectionId::Projects {
      self.videos = VideoDeck::new();
    }
  }

  /// Tear down everything (locale change or page exit).
  pub fn unmount(mut self) {
    self.release();
  }

  fn release(&mut self) {
    self.observer.disconnect();
    for timeline in &mut self.timelines {
      timeline.kill();
    }
    self.timelines.clear();
    self.scroll = None;
    self.menu_open = false;
    self.videos = VideoDeck::new();
  }

  fn feed(&mut self, viewport: Viewport) {
    self.viewport = viewport;
    self.observer.on_scroll(viewport);
    for timeline in &mut self.timelines {
      timeline.on_scroll(viewport);
    }
  }
}

impl Drop for PageStage {
  fn drop(&mut self) {
    self.release();
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;

  const VH: f64 = 800.0;

  fn layout() -> PageLayout {
    let heights: Vec<(SectionId, f64)> = SectionId::ALL.into_iter().map(|id| (id, VH)).collect();
    PageLayout::stacked(&heights, VH)
  }

  fn settle(stage: &mut PageStage) {
    while stage.is_scrolling() {
      stage.tick(1.0 / 60.0);
    }
  }

  #[test]
  fn mounts_home_active_at_top() {
    let stage = PageStage::mount(&layout(), 0.0);
    assert_eq!(stage.active(), SectionId::Home);
    assert_eq!(stage.timelines().len(), SectionId::ALL.len() + 2);
  }

  #[test]
  fn scroll_to_aligns_section_top() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    for id in [SectionId::Projects, SectionId::About, SectionId::Contact] {
      let target = stage.scroll_to(id).unwrap();
      assert_eq!(stage.active(), id);
      settle(&mut stage);
      let bounds = stage.observer.bounds_of(id).unwrap();
      assert_eq!(stage.viewport().scroll_top, target);
      assert_eq!(stage.viewport().scroll_top, bounds.top);
      assert_eq!(stage.active(), id);
    }
  }

  #[test]
  fn returning_to_top_forces_home() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    stage.scroll_by_user(2500.0);
    assert_eq!(stage.active(), SectionId::Skills);
    stage.scroll_by_user(0.0);
    assert_eq!(stage.active(), SectionId::Home);
  }

  #[test]
  fn menu_click_collapses_mobile_menu() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    assert!(!stage.is_menu_open());
    assert!(stage.toggle_menu());
    stage.navigate(SectionId::Services).unwrap();
    assert!(!stage.is_menu_open());
    assert_eq!(stage.active(), SectionId::Services);
  }

  #[test]
  fn carousel_advances_with_ticks() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    for _ in 0..35 {
      stage.tick(0.1);
    }
    assert_eq!(stage.carousel().current(), 1);
    stage.select_slide(4).unwrap();
    assert_eq!(stage.carousel().offset_percent(), 400);
    assert!(stage.select_slide(5).is_err());
  }

  #[test]
  fn one_video_plays_until_projects_unmount() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    assert_eq!(stage.play_video(0), None);
    assert_eq!(stage.play_video(2), Some(0));
    stage.video_stopped(2);
    assert_eq!(stage.playing_video(), None);
    stage.play_video(1);
    stage.unmount_section(SectionId::Projects);
    assert_eq!(stage.playing_video(), None);
  }

  #[test]
  fn user_scroll_cancels_smooth_scroll() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    stage.scroll_to(SectionId::Contact);
    stage.tick(0.1);
    stage.scroll_by_user(900.0);
    assert!(!stage.is_scrolling());
    assert_eq!(stage.viewport().scroll_top, 900.0);
  }

  #[test]
  fn section_text_reveals_when_scrolled_into_band() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    stage.scroll_by_user(VH);
    stage.tick(5.0);
    let about = stage
      .timelines()
      .iter()
      .find(|t| t.spec().target == RevealTarget::SectionText(SectionId::About))
      .unwrap();
    assert_eq!(about.progress(), 1.0);
  }

  #[test]
  fn unmounted_section_stops_reporting() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let _sub = stage.subscribe(move |id| sink.borrow_mut().push(id));

    stage.unmount_section(SectionId::Resume);
    assert!(!stage.is_observing(SectionId::Resume));
    assert_eq!(stage.timelines_for(SectionId::Resume), 0);

    stage.scroll_by_user(2.0 * VH);
    assert!(!seen.borrow().contains(&SectionId::Resume));
    assert_eq!(stage.scroll_to(SectionId::Resume), None);
  }

  #[test]
  fn unmounting_about_drops_portrait_timeline() {
    let mut stage = PageStage::mount(&layout(), 0.0);
    assert_eq!(stage.timelines_for(SectionId::About), 2);
    stage.unmount_section(SectionId::About);
    assert_eq!(stage.timelines_for(SectionId::About), 0);
  }

  #[test]
  fn full_unmount_releases_subscribers_callbacks() {
    let stage = PageStage::mount(&layout(), 0.0);
    let sub = stage.subscribe(|_| {});
    assert!(sub.is_active());
    stage.unmount();
    assert!(!sub.is_active());
  }
}
