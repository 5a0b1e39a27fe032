/* src/cli/core/src/serve.rs */

use std::path::Path;

use anyhow::{Result, anyhow};
use folio_server::{DirSource, FolioServer, SmtpMailer};
use folio_server_axum::IntoAxumRouter;

use crate::config::{FolioConfig, resolve_path};
use crate::ui;

/// Assemble the server from config. `base_dir` anchors relative paths.
pub fn build_server(config: &FolioConfig, base_dir: &Path) -> Result<FolioServer> {
  let mail = config.mail.to_mail_config().with_env();
  if !mail.has_credentials() {
    ui::warn("EMAIL_USER / EMAIL_PASS not set -- contact messages will fail to send");
  }

  let mut server = FolioServer::new()
    .default_locale(config.i18n.default_locale()?)
    .mailer(SmtpMailer::new(mail));

  if let Some(dir) = &config.i18n.dir {
    let dir = resolve_path(base_dir, dir);
    ui::detail(&format!("dictionaries from {}", dir.display()));
    server = server.dictionary_source(DirSource::new(dir));
  }

  let public = resolve_path(base_dir, &config.server.public_dir);
  if public.is_dir() {
    ui::detail(&format!("static files from {}", public.display()));
    server = server.public_dir(public);
  } else {
    tracing::warn!(dir = %public.display(), "public directory missing, static assets disabled");
  }

  Ok(server)
}

pub async fn run_serve(config: &FolioConfig, base_dir: &Path, port: Option<u16>) -> Result<()> {
  ui::banner("serve");
  let server = build_server(config, base_dir)?;

  let env_port = std::env::var("PORT").ok();
  let port = config.server.effective_port(env_port.as_deref(), port);
  let addr = format!("{}:{port}", config.server.host);

  ui::arrow(&format!("http://localhost:{port}"));
  ui::blank();
  server.serve(&addr).await.map_err(|e| anyhow!("server on {addr} failed: {e}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_with_defaults_and_no_public_dir() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(build_server(&FolioConfig::default(), tmp.path()).is_ok());
  }

  #[tokio::test]
  async fn serves_public_dir_and_locale_dir_from_config_base() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("static")).unwrap();
    std::fs::write(tmp.path().join("static/resume.txt"), "resume").unwrap();
    std::fs::create_dir_all(tmp.path().join("locales")).unwrap();
    for locale in folio_server::Locale::ALL {
      std::fs::write(
        tmp.path().join(format!("locales/{locale}.json")),
        folio_server::BundledSource::raw(locale),
      )
      .unwrap();
    }

    let config: FolioConfig = toml::from_str(
      "[server]\npublic_dir = \"static\"\n\n[i18n]\ndefault = \"fa\"\ndir = \"locales\"\n",
    )
    .unwrap();
    let router = build_server(&config, tmp.path()).unwrap().into_axum_router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });

    let client =
      reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build().unwrap();
    let asset = client.get(format!("http://{addr}/resume.txt")).send().await.unwrap();
    assert_eq!(asset.text().await.unwrap(), "resume");

    let root = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(root.headers()["location"], "/fa");
  }
}
