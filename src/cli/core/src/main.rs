/* src/cli/core/src/main.rs */

mod check;
mod config;
mod send;
mod serve;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_server::ContactSubmission;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{FolioConfig, find_folio_config, load_folio_config};

#[derive(Parser)]
#[command(name = "folio", about = "Bilingual portfolio site server")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the site and the contact relay
  Serve {
    /// Path to folio.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Listen port, overriding folio.toml and PORT
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Load and validate every locale dictionary
  Check {
    /// Directory of {locale}.json files (bundled dictionaries if omitted)
    #[arg(short, long)]
    dir: Option<PathBuf>,
  },
  /// Submit the contact form to a running server
  Send {
    /// Base URL of the server
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,
    /// Locale for validation and result messages
    #[arg(short, long, default_value = "en")]
    locale: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    message: String,
  },
}

fn init_tracing() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "folio=info,tower_http=info,warn".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();
}

/// Resolve config path (explicit or auto-detected) and parse it. With no
/// explicit path and nothing found, defaults apply relative to cwd.
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, FolioConfig)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let path = match explicit {
    Some(p) => p,
    None => match find_folio_config(&cwd) {
      Ok(p) => p,
      Err(_) => return Ok((cwd, FolioConfig::default())),
    },
  };
  let config = load_folio_config(&path)?;
  let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
  Ok((base_dir, config))
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing();

  match cli.command {
    Command::Serve { config, port } => {
      let (base_dir, folio_config) = resolve_config(config)?;
      serve::run_serve(&folio_config, &base_dir, port).await?;
    }
    Command::Check { dir } => {
      check::run_check(dir.as_deref()).await?;
    }
    Command::Send { url, locale, name, email, phone, message } => {
      let draft = ContactSubmission { full_name: name, email, phone_number: phone, message };
      send::run_send(&url, &locale, draft).await?;
    }
  }

  Ok(())
}
