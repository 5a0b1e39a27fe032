/* src/server/core/rust/src/dictionary/tests.rs */

use std::sync::Arc;

use super::*;

#[test]
fn bundled_documents_are_complete() {
  for locale in Locale::ALL {
    let dict = Dictionary::from_json(locale, BundledSource::raw(locale)).unwrap();
    assert!(!dict.is_blank());
    assert!(dict.flatten().values().all(|v| !v.is_empty()), "{locale} has blank text");
  }
}

#[test]
fn locales_share_key_set() {
  let en = Dictionary::from_json(Locale::En, BundledSource::raw(Locale::En)).unwrap();
  let fa = Dictionary::from_json(Locale::Fa, BundledSource::raw(Locale::Fa)).unwrap();
  let en_keys: Vec<_> = en.flatten().into_keys().collect();
  let fa_keys: Vec<_> = fa.flatten().into_keys().collect();
  assert_eq!(en_keys, fa_keys);
}

#[test]
fn lookup_by_dotted_key() {
  let en = Dictionary::from_json(Locale::En, BundledSource::raw(Locale::En)).unwrap();
  assert_eq!(en.lookup("menu.home").as_deref(), Some("Home"));
  assert_eq!(en.lookup("content.about.title").as_deref(), Some("About Me"));
  assert_eq!(
    en.lookup("form.errors.phoneNumber.invalidNumber"),
    Some(en.form.errors.phone_number.invalid_number.clone())
  );
  assert_eq!(en.lookup("menu.missing"), None);
  assert_eq!(en.lookup("menu"), None);
}

#[test]
fn placeholder_is_blank() {
  let dict = Dictionary::default();
  assert!(dict.is_blank());
  assert_eq!(dict.lookup("menu.home").as_deref(), Some(""));
}

#[test]
fn rejects_empty_leaf() {
  let json = BundledSource::raw(Locale::En).replacen("\"Home\"", "\"  \"", 1);
  let err = Dictionary::from_json(Locale::En, &json).unwrap_err();
  assert_eq!(err.code(), "DICTIONARY_ERROR");
  assert!(err.message().contains("menu.home"), "{}", err.message());
}

#[test]
fn rejects_unknown_key() {
  let mut value: serde_json::Value = serde_json::from_str(BundledSource::raw(Locale::En)).unwrap();
  value["menu"]["blog"] = serde_json::json!("Blog");
  let err = Dictionary::from_json(Locale::En, &value.to_string()).unwrap_err();
  assert!(err.message().contains("blog"), "{}", err.message());
}

#[test]
fn rejects_missing_section() {
  let mut value: serde_json::Value = serde_json::from_str(BundledSource::raw(Locale::Fa)).unwrap();
  value.as_object_mut().unwrap().remove("form");
  let err = Dictionary::from_json(Locale::Fa, &value.to_string()).unwrap_err();
  assert!(err.message().starts_with("fa:"));
}

#[test]
fn rejects_invalid_json() {
  let err = Dictionary::from_json(Locale::En, "{ not json").unwrap_err();
  assert!(err.message().contains("invalid JSON"));
}

// -- resolver --

fn bundled() -> LocaleResolver {
  LocaleResolver::new(Arc::new(BundledSource))
}

#[tokio::test]
async fn every_supported_locale_resolves_non_empty() {
  let resolver = bundled();
  for locale in Locale::ALL {
    let resolved = resolver.resolve(locale.as_str()).await.unwrap();
    assert_eq!(resolved.locale, locale);
    assert!(!resolved.fell_back);
    assert!(!resolved.dictionary.is_blank());
  }
}

#[tokio::test]
async fn unsupported_tag_falls_back_to_default() {
  let resolver = bundled();
  let resolved = resolver.resolve("de").await.unwrap();
  assert_eq!(resolved.locale, Locale::En);
  assert!(resolved.fell_back);
  assert_eq!(resolved.dictionary.menu.home, "Home");
}

#[tokio::test]
async fn configured_default_is_used_for_fallback() {
  let resolver = bundled().with_default(Locale::Fa);
  let resolved = resolver.resolve("xx").await.unwrap();
  assert_eq!(resolved.locale, Locale::Fa);
  assert_eq!(resolved.dictionary.menu.home, "خانه");
}

#[tokio::test]
async fn dir_source_unregistered_locale_falls_back() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join("en.json"), BundledSource::raw(Locale::En)).unwrap();

  let resolver = LocaleResolver::new(Arc::new(DirSource::new(tmp.path())));
  assert_eq!(resolver.source_kind(), "dir");
  let resolved = resolver.resolve("fa").await.unwrap();
  assert_eq!(resolved.locale, Locale::En);
  assert!(resolved.fell_back);
}

#[tokio::test]
async fn dir_source_missing_default_fails() {
  let tmp = tempfile::tempdir().unwrap();
  let resolver = LocaleResolver::new(Arc::new(DirSource::new(tmp.path())));
  let err = resolver.resolve("en").await.unwrap_err();
  assert_eq!(err.code(), "DICTIONARY_ERROR");
}

#[tokio::test]
async fn broken_registered_locale_is_an_error() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join("en.json"), BundledSource::raw(Locale::En)).unwrap();
  std::fs::write(tmp.path().join("fa.json"), "{}").unwrap();

  let resolver = LocaleResolver::new(Arc::new(DirSource::new(tmp.path())));
  assert!(resolver.resolve("fa").await.is_err());
}

#[tokio::test]
async fn failed_load_leaves_placeholder() {
  let tmp = tempfile::tempdir().unwrap();
  let resolver = LocaleResolver::new(Arc::new(DirSource::new(tmp.path())));
  let resolved = resolver.resolve_or_placeholder("fa").await;
  assert_eq!(resolved.locale, Locale::En);
  assert!(resolved.dictionary.is_blank());
}

#[tokio::test]
async fn dir_source_registers_only_files() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join("en.json"), BundledSource::raw(Locale::En)).unwrap();
  std::fs::create_dir(tmp.path().join("fa.json")).unwrap();

  let source = DirSource::new(tmp.path());
  assert!(source.has(Locale::En).await);
  assert!(!source.has(Locale::Fa).await);

  let resolver = LocaleResolver::new(Arc::new(source));
  assert_eq!(resolver.effective_locale("fa").await, Locale::En);
  assert_eq!(resolver.effective_locale("en").await, Locale::En);
}
