/* src/cli/core/src/send.rs */

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use folio_server::{
  BoxFuture, BundledSource, ContactForm, ContactReply, ContactResponse, ContactSubmission,
  ContactTransport, Feedback, FolioError, LocaleResolver, SubmitOutcome,
};

use crate::ui;

/// Posts submissions to a running server's `/api/contact`.
pub struct HttpTransport {
  client: reqwest::Client,
  endpoint: String,
}

impl HttpTransport {
  pub fn new(base_url: &str) -> Result<Self> {
    let client = reqwest::Client::builder().build().context("failed to build HTTP client")?;
    let endpoint = format!("{}/api/contact", base_url.trim_end_matches('/'));
    Ok(Self { client, endpoint })
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }
}

impl ContactTransport for HttpTransport {
  fn post<'a>(
    &'a self,
    submission: &'a ContactSubmission,
  ) -> BoxFuture<'a, Result<ContactReply, FolioError>> {
    Box::pin(async move {
      let resp = self
        .client
        .post(&self.endpoint)
        .json(submission)
        .send()
        .await
        .map_err(|e| FolioError::internal(format!("POST {}: {e}", self.endpoint)))?;
      let status = resp.status().as_u16();
      // Body is informational only; the status decides the outcome.
      let body = resp.json::<ContactResponse>().await.ok();
      Ok(ContactReply { status, body })
    })
  }
}

/// Toasts become terminal lines.
struct TerminalFeedback;

impl Feedback for TerminalFeedback {
  fn success(&mut self, message: &str) {
    ui::ok(message);
  }

  fn error(&mut self, message: &str) {
    ui::fail(message);
  }

  fn celebrate(&mut self) {
    ui::detail("\u{1f389}");
  }
}

/// Run the form's submit flow once against `base_url`, with messages in `locale`.
pub async fn run_send(base_url: &str, locale: &str, draft: ContactSubmission) -> Result<()> {
  ui::banner("send");

  let resolver = LocaleResolver::new(Arc::new(BundledSource));
  let resolved = resolver.resolve(locale).await?;
  if resolved.fell_back {
    ui::warn(&format!("locale \"{locale}\" unsupported, using {}", resolved.locale));
  }
  let text = &resolved.dictionary.form;

  let transport = HttpTransport::new(base_url)?;
  ui::arrow(transport.endpoint());

  let mut form = ContactForm::with_draft(draft);
  match form.submit(text, &transport, &mut TerminalFeedback).await {
    SubmitOutcome::Sent => Ok(()),
    SubmitOutcome::Invalid(errors) => {
      for (field, message) in errors.iter() {
        ui::fail(&format!("{}: {message}", field.as_str()));
      }
      bail!("{} field(s) need attention", errors.len())
    }
    SubmitOutcome::Busy => bail!("a submit is already in flight"),
    SubmitOutcome::Failed => bail!("{} did not accept the message", transport.endpoint()),
  }
}
