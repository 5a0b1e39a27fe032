/* src/server/core/rust/src/slider.rs */

use std::time::Duration;

use crate::errors::FolioError;

pub const SLIDES: [&str; 5] = [
  "/images/laptop.jpg",
  "/images/mouse.jpg",
  "/images/squares.jpg",
  "/images/technology.jpg",
  "/images/banner.jpg",
];

pub const SLIDE_INTERVAL: Duration = Duration::from_millis(3000);

/// Hero image carousel. Auto-advances on a fixed interval and wraps around;
/// selecting a bullet jumps without restarting the interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
  len: usize,
  index: usize,
  interval: Duration,
  elapsed: Duration,
}

impl Default for Carousel {
  fn default() -> Self {
    Self::new(SLIDES.len())
  }
}

impl Carousel {
  pub fn new(len: usize) -> Self {
    Self { len, index: 0, interval: SLIDE_INTERVAL, elapsed: Duration::ZERO }
  }

  pub fn with_interval(mut self, interval: Duration) -> Self {
    self.interval = interval;
    self
  }

  pub fn current(&self) -> usize {
    self.index
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Horizontal track offset, in percent of one slide width.
  pub fn offset_percent(&self) -> usize {
    self.index * 100
  }

  pub fn advance(&mut self) {
    if self.len > 0 {
      self.index = (self.index + 1) % self.len;
    }
  }

  pub fn select(&mut self, index: usize) -> Result<(), FolioError> {
    if index >= self.len {
      return Err(FolioError::not_found(format!("No slide {index} (have {})", self.len)));
    }
    self.index = index;
    Ok(())
  }

  /// Let `dt` pass; returns how many slides were advanced.
  pub fn tick(&mut self, dt: Duration) -> u32 {
    if self.interval.is_zero() {
      return 0;
    }
    self.elapsed += dt;
    let mut steps = 0;
    while self.elapsed >= self.interval {
      self.elapsed -= self.interval;
      self.advance();
      steps += 1;
    }
    steps
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn advances_every_interval_and_wraps() {
    let mut c = Carousel::default();
    assert_eq!(c.tick(Duration::from_millis(2999)), 0);
    assert_eq!(c.tick(Duration::from_millis(1)), 1);
    assert_eq!(c.current(), 1);
    assert_eq!(c.tick(SLIDE_INTERVAL * 4), 4);
    assert_eq!(c.current(), 0);
  }

  #[test]
  fn select_jumps_without_resetting_timer() {
    let mut c = Carousel::default();
    c.tick(Duration::from_millis(2000));
    c.select(3).unwrap();
    assert_eq!(c.offset_percent(), 300);
    c.tick(Duration::from_millis(1000));
    assert_eq!(c.current(), 4);
  }

  #[test]
  fn select_out_of_range() {
    let mut c = Carousel::default();
    assert_eq!(c.select(5).unwrap_err().code(), "NOT_FOUND");
    assert_eq!(c.current(), 0);
  }

  #[test]
  fn empty_carousel_never_moves() {
    let mut c = Carousel::new(0);
    c.tick(SLIDE_INTERVAL * 2);
    assert_eq!(c.current(), 0);
    assert!(c.is_empty());
  }
}
