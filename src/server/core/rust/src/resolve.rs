/* src/server/core/rust/src/resolve.rs */

use crate::locale::Locale;
use crate::theme::Theme;

/// Cookie remembering the visitor's last explicit locale choice.
pub const LOCALE_COOKIE: &str = "folio-locale";
/// Cookie remembering the mode toggle choice.
pub const THEME_COOKIE: &str = "folio-theme";
/// Query parameter the mode toggle links set.
pub const THEME_PARAM: &str = "theme";

/// Request facts available when choosing a locale for the bare `/` route.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolveContext<'a> {
  pub path_locale: Option<&'a str>,
  pub cookie_header: Option<&'a str>,
  pub accept_language: Option<&'a str>,
  pub default_locale: Locale,
}

/// Resolve chain: path segment -> cookie -> Accept-Language -> default.
pub fn resolve_request_locale(ctx: &ResolveContext<'_>) -> Locale {
  if let Some(loc) = ctx.path_locale.and_then(Locale::from_tag) {
    return loc;
  }

  if let Some(loc) =
    ctx.cookie_header.and_then(|h| cookie_value(h, LOCALE_COOKIE)).and_then(Locale::from_tag)
  {
    return loc;
  }

  if let Some(loc) = ctx.accept_language.and_then(parse_accept_language) {
    return loc;
  }

  ctx.default_locale
}

/// Theme chain: `?theme=` -> cookie -> system. An unknown value at one step
/// falls through to the next.
pub fn resolve_request_theme(query: Option<&str>, cookie_header: Option<&str>) -> Theme {
  let from_query = query.and_then(|q| query_value(q, THEME_PARAM)).and_then(Theme::from_tag);
  let from_cookie =
    || cookie_header.and_then(|h| cookie_value(h, THEME_COOKIE)).and_then(Theme::from_tag);
  from_query.or_else(from_cookie).unwrap_or_default()
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
  header
    .split(';')
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(k, _)| k.trim() == name)
    .map(|(_, v)| v.trim())
}

fn query_value<'a>(query: &'a str, name: &str) -> Option<&'a str> {
  query
    .split('&')
    .filter_map(|pair| pair.split_once('='))
    .find(|(k, _)| *k == name)
    .map(|(_, v)| v)
}

fn parse_accept_language(header: &str) -> Option<Locale> {
  let mut entries: Vec<(&str, f64)> = Vec::new();
  for part in header.split(',') {
    let part = part.trim();
    if part.is_empty() {
      continue;
    }
    let mut segments = part.split(';');
    let lang = segments.next().unwrap_or("").trim();
    let mut q = 1.0_f64;
    for s in segments {
      if let Some(val) = s.trim().strip_prefix("q=") {
        if let Ok(v) = val.parse::<f64>() {
          q = v;
        }
      }
    }
    entries.push((lang, q));
  }

  entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

  entries.iter().find_map(|(lang, _)| {
    // Prefix match: fa-IR -> fa
    let primary = lang.split('-').next().unwrap_or(lang);
    Locale::from_tag(primary)
  })
}

/// Rewrite the first path segment to `locale`, keeping the rest of the path.
/// Used by the language switcher: `/fa#about` -> `/en#about`.
pub fn switch_locale_path(path: &str, locale: Locale) -> String {
  if path.is_empty() || path == "/" {
    return format!("/{locale}");
  }
  let mut segments: Vec<&str> = path.split('/').collect();
  // Leading "/" yields an empty first element; segments[1] is the locale slot.
  if segments.len() < 2 {
    return format!("/{locale}");
  }
  let tag = locale.as_str();
  segments[1] = tag;
  segments.join("/")
}
