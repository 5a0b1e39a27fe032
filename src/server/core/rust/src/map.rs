/* src/server/core/rust/src/map.rs */

use serde::Serialize;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
  "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const MARKER_POPUP: &str = "This is where i live now.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
  pub lat: f64,
  pub lng: f64,
}

/// Initial state of the contact-section map, handed to the client map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
  pub center: LatLng,
  pub zoom: u8,
  pub marker_position: LatLng,
}

impl Default for MapState {
  fn default() -> Self {
    let home = LatLng { lat: 37.2808, lng: 49.5832 };
    Self { center: home, zoom: 11, marker_position: home }
  }
}
