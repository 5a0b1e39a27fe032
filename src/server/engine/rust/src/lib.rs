/* src/server/engine/rust/src/lib.rs */

pub mod escape;
pub mod page;
pub mod render;

// Public API re-exports
pub use escape::{ascii_escape_json, escape_html};
pub use page::{
  DATA_ID, FolioData, PageContext, SOCIAL_LINKS, SocialLink, build_folio_data, data_script,
};
pub use render::render_page;
