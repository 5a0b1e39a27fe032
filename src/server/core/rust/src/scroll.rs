/* src/server/core/rust/src/scroll.rs */

use crate::observer::Bounds;

/// Seconds a smooth scroll takes regardless of distance.
pub const SMOOTH_SCROLL_DURATION: f64 = 0.6;

/// Scroll offset that puts `bounds.top` at the viewport top, clamped to what
/// the document can actually scroll to.
pub fn scroll_target(bounds: Bounds, document_height: f64, viewport_height: f64) -> f64 {
  let max_scroll = (document_height - viewport_height).max(0.0);
  bounds.top.clamp(0.0, max_scroll)
}

/// An in-flight smooth scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
  from: f64,
  to: f64,
  duration: f64,
  elapsed: f64,
}

impl SmoothScroll {
  pub fn new(from: f64, to: f64) -> Self {
    Self::with_duration(from, to, SMOOTH_SCROLL_DURATION)
  }

  pub fn with_duration(from: f64, to: f64, duration: f64) -> Self {
    Self { from, to, duration: duration.max(0.0), elapsed: 0.0 }
  }

  pub fn target(&self) -> f64 {
    self.to
  }

  pub fn is_finished(&self) -> bool {
    self.elapsed >= self.duration
  }

  /// Current offset on an ease-in-out cubic curve. Exactly `target()` once finished.
  pub fn position(&self) -> f64 {
    if self.is_finished() {
      return self.to;
    }
    let t = self.elapsed / self.duration;
    let eased = if t < 0.5 { 4.0 * t * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0 };
    self.from + (self.to - self.from) * eased
  }

  /// Advance by `dt` seconds and return the new offset.
  pub fn step(&mut self, dt: f64) -> f64 {
    self.elapsed = (self.elapsed + dt).min(self.duration);
    self.position()
  }
}
