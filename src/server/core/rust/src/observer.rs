/* src/server/core/rust/src/observer.rs */

//! Viewport tracking for the page sections.
//!
//! The observer is fed scroll positions and reports a section as visible when
//! at least half of it enters the viewport. Reports go to subscribers, each
//! held alive by a `Subscription` handle that unsubscribes on drop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::section::SectionId;

/// Fraction of a section's height that must be on screen to report it.
pub const ACTIVE_THRESHOLD: f64 = 0.5;

/// Vertical box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
  pub top: f64,
  pub height: f64,
}

impl Bounds {
  pub fn new(top: f64, height: f64) -> Self {
    Self { top, height }
  }

  pub fn bottom(&self) -> f64 {
    self.top + self.height
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
  pub scroll_top: f64,
  pub height: f64,
}

impl Viewport {
  pub fn new(scroll_top: f64, height: f64) -> Self {
    Self { scroll_top, height }
  }

  pub fn bottom(&self) -> f64 {
    self.scroll_top + self.height
  }

  pub fn is_at_top(&self) -> bool {
    self.scroll_top <= 0.0
  }

  /// Share of `bounds` inside the viewport, in `[0, 1]`.
  pub fn visible_ratio(&self, bounds: Bounds) -> f64 {
    if bounds.height <= 0.0 {
      return 0.0;
    }
    let overlap = self.bottom().min(bounds.bottom()) - self.scroll_top.max(bounds.top);
    (overlap.max(0.0) / bounds.height).min(1.0)
  }
}

type Callback = Box<dyn FnMut(SectionId)>;

#[derive(Default)]
struct Registry {
  next_id: u64,
  callbacks: Vec<(u64, Callback)>,
  dispatching: bool,
  // Handles dropped while their callback was taken out for dispatch.
  removed: Vec<u64>,
}

/// Keeps one observer callback registered. Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
  id: u64,
  registry: Weak<RefCell<Registry>>,
}

impl Subscription {
  pub fn unsubscribe(self) {}

  /// False once the observer itself has been dropped.
  pub fn is_active(&self) -> bool {
    self
      .registry
      .upgrade()
      .is_some_and(|reg| reg.borrow().callbacks.iter().any(|(id, _)| *id == self.id))
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    let Some(registry) = self.registry.upgrade() else {
      return;
    };
    // Closures are dropped after the borrow ends: they may own other subscriptions.
    let _gone: Vec<(u64, Callback)> = {
      let mut reg = registry.borrow_mut();
      if reg.dispatching {
        reg.removed.push(self.id);
      }
      let (gone, keep) =
        std::mem::take(&mut reg.callbacks).into_iter().partition(|(id, _)| *id == self.id);
      reg.callbacks = keep;
      gone
    };
  }
}

struct Observed {
  id: SectionId,
  bounds: Bounds,
  above_threshold: bool,
}

pub struct SectionObserver {
  sections: Vec<Observed>,
  registry: Rc<RefCell<Registry>>,
  threshold: f64,
}

impl SectionObserver {
  pub fn new() -> Self {
    Self::with_threshold(ACTIVE_THRESHOLD)
  }

  pub fn with_threshold(threshold: f64) -> Self {
    Self { sections: Vec::new(), registry: Rc::default(), threshold }
  }

  /// Start tracking a section. Re-observing replaces its bounds and resets its
  /// crossing state.
  pub fn observe(&mut self, id: SectionId, bounds: Bounds) {
    self.sections.retain(|s| s.id != id);
    self.sections.push(Observed { id, bounds, above_threshold: false });
    self.sections.sort_by_key(|s| s.id);
  }

  /// Stop tracking a section. Returns false if it was not observed.
  pub fn unobserve(&mut self, id: SectionId) -> bool {
    let before = self.sections.len();
    self.sections.retain(|s| s.id != id);
    self.sections.len() != before
  }

  /// Drop every observed section. Subscriptions stay registered but will not
  /// fire until something is observed again.
  pub fn disconnect(&mut self) {
    self.sections.clear();
  }

  /// Update a section's box after a relayout, keeping its crossing state.
  pub fn relayout(&mut self, id: SectionId, bounds: Bounds) -> bool {
    match self.sections.iter_mut().find(|s| s.id == id) {
      Some(section) => {
        section.bounds = bounds;
        true
      }
      None => false,
    }
  }

  pub fn is_observing(&self, id: SectionId) -> bool {
    self.sections.iter().any(|s| s.id == id)
  }

  pub fn observed(&self) -> impl Iterator<Item = SectionId> + '_ {
    self.sections.iter().map(|s| s.id)
  }

  pub fn bounds_of(&self, id: SectionId) -> Option<Bounds> {
    self.sections.iter().find(|s| s.id == id).map(|s| s.bounds)
  }

  /// Bottom edge of the lowest observed section.
  pub fn document_height(&self) -> f64 {
    self.sections.iter().map(|s| s.bounds.bottom()).fold(0.0, f64::max)
  }

  pub fn subscribe(&self, callback: impl FnMut(SectionId) + 'static) -> Subscription {
    let mut reg = self.registry.borrow_mut();
    let id = reg.next_id;
    reg.next_id += 1;
    reg.callbacks.push((id, Box::new(callback)));
    Subscription { id, registry: Rc::downgrade(&self.registry) }
  }

  pub fn subscriber_count(&self) -> usize {
    self.registry.borrow().callbacks.len()
  }

  /// Process a scroll position. Sections whose visible share rose past the
  /// threshold are reported in document order; at the very top of the page
  /// `home` is reported last so it wins over anything else in view.
  pub fn on_scroll(&mut self, viewport: Viewport) -> Vec<SectionId> {
    let mut reports = Vec::new();
    for section in &mut self.sections {
      let above = viewport.visible_ratio(section.bounds) >= self.threshold;
      if above && !section.above_threshold {
        reports.push(section.id);
      }
      section.above_threshold = above;
    }

    if viewport.is_at_top() && self.is_observing(SectionId::Home) {
      reports.push(SectionId::Home);
    }

    for id in &reports {
      self.dispatch(*id);
    }
    reports
  }

  fn dispatch(&self, section: SectionId) {
    let mut callbacks = {
      let mut reg = self.registry.borrow_mut();
      reg.dispatching = true;
      std::mem::take(&mut reg.callbacks)
    };

    for (_, callback) in &mut callbacks {
      callback(section);
    }

    let _gone: Vec<(u64, Callback)> = {
      let mut reg = self.registry.borrow_mut();
      let removed = std::mem::take(&mut reg.removed);
      let (gone, mut keep): (Vec<_>, Vec<_>) =
        callbacks.into_iter().partition(|(id, _)| removed.contains(id));
      // Subscriptions created from inside a callback landed in the emptied list.
      keep.append(&mut reg.callbacks);
      reg.callbacks = keep;
      reg.dispatching = false;
      gone
    };
  }
}

impl Default for SectionObserver {
  fn default() -> Self {
    Self::new()
  }
}
