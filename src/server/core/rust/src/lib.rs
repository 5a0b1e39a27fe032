/* src/server/core/rust/src/lib.rs */

pub mod contact;
pub mod dictionary;
pub mod errors;
pub mod locale;
pub mod mail;
pub mod map;
pub mod observer;
pub mod projects;
pub mod resolve;
pub mod reveal;
pub mod scroll;
pub mod section;
pub mod server;
pub mod slider;
pub mod stage;
pub mod theme;

use std::future::Future;
use std::pin::Pin;

// Re-exports for ergonomic use
pub use contact::{
  ContactField, ContactForm, ContactReply, ContactResponse, ContactSubmission, ContactTransport,
  Feedback, SubmitOutcome, ValidationErrors,
};
pub use dictionary::{
  BundledSource, Dictionary, DictionarySource, DirSource, LocaleResolver, Resolved,
};
pub use errors::FolioError;
pub use locale::{Direction, Locale};
pub use mail::{MailConfig, Mailer, SmtpMailer};
pub use map::MapState;
pub use observer::{ACTIVE_THRESHOLD, Bounds, SectionObserver, Subscription, Viewport};
pub use projects::{PROJECTS, Project, VideoDeck};
pub use resolve::{
  LOCALE_COOKIE, ResolveContext, THEME_COOKIE, THEME_PARAM, resolve_request_locale,
  resolve_request_theme, switch_locale_path,
};
pub use reveal::{RevealSpec, RevealTimeline, page_reveals};
pub use scroll::SmoothScroll;
pub use section::SectionId;
pub use server::{FolioParts, FolioServer};
pub use slider::{Carousel, SLIDES};
pub use stage::{PageLayout, PageStage};
pub use theme::Theme;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
