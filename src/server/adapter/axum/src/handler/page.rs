/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use folio_engine::{PageContext, render_page};
use folio_server::{
  LOCALE_COOKIE, ResolveContext, THEME_COOKIE, resolve_request_locale, resolve_request_theme,
};

use super::AppState;

fn cookie_header(headers: &HeaderMap) -> Option<&str> {
  headers.get(header::COOKIE).and_then(|v| v.to_str().ok())
}

/// `GET /`: pick a locale from cookie, then Accept-Language, then the default,
/// and redirect to its page.
pub(super) async fn handle_root(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Redirect {
  let ctx = ResolveContext {
    path_locale: None,
    cookie_header: cookie_header(&headers),
    accept_language: headers.get(header::ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
    default_locale: state.resolver.default_locale(),
  };
  let locale = resolve_request_locale(&ctx);
  Redirect::temporary(&format!("/{locale}"))
}

/// `GET /{locale}`: render the page. A dictionary that fails to load leaves
/// placeholder text rather than failing the request. `?theme=` switches the
/// color scheme and is remembered alongside the locale.
pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  uri: Uri,
) -> Response {
  let tag = uri.path().trim_start_matches('/');
  let resolved = state.resolver.resolve_or_placeholder(tag).await;
  let theme = resolve_request_theme(uri.query(), cookie_header(&headers));

  let ctx = PageContext::new(resolved.locale, &resolved.dictionary, uri.path()).with_theme(theme);
  let html = render_page(&ctx);

  let mut response = Html(html).into_response();
  for cookie in [
    format!("{LOCALE_COOKIE}={}; Path=/; SameSite=Lax", resolved.locale),
    format!("{THEME_COOKIE}={theme}; Path=/; SameSite=Lax"),
  ] {
    if let Ok(value) = HeaderValue::from_str(&cookie) {
      response.headers_mut().append(header::SET_COOKIE, value);
    }
  }
  response
}
