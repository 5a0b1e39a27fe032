/* src/server/adapter/axum/src/handler/mod.rs */

mod contact;
mod page;

use std::sync::Arc;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use folio_server::{FolioError, FolioParts, Locale, LocaleResolver, Mailer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AxumError;

pub(crate) struct AppState {
  pub resolver: LocaleResolver,
  pub mailer: Arc<dyn Mailer>,
}

pub(crate) fn build_router(parts: FolioParts) -> Router {
  let FolioParts { resolver, mailer, public_dir } = parts;

  let mut router: Router<Arc<AppState>> = Router::new()
    .route("/", get(page::handle_root))
    .route("/api/contact", post(contact::handle_contact));

  // One route per supported locale; every other path is a static asset.
  for locale in Locale::ALL {
    router = router.route(&format!("/{locale}"), get(page::handle_page));
  }

  router = match public_dir {
    Some(dir) => {
      router.fallback_service(ServeDir::new(dir).fallback(handle_not_found.into_service()))
    }
    None => router.fallback(handle_not_found),
  };

  let state = Arc::new(AppState { resolver, mailer });
  router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn handle_not_found() -> AxumError {
  FolioError::not_found("Not found").into()
}
