/* src/server/core/rust/src/mail.rs */

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::BoxFuture;
use crate::contact::ContactSubmission;
use crate::errors::FolioError;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission";
pub const USER_ENV: &str = "EMAIL_USER";
pub const PASS_ENV: &str = "EMAIL_PASS";

/// Delivers a contact submission to the site owner.
pub trait Mailer: Send + Sync {
  fn send<'a>(&'a self, submission: &'a ContactSubmission) -> BoxFuture<'a, Result<(), FolioError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
  pub host: String,
  pub port: u16,
  pub subject: String,
  pub user: Option<String>,
  pub pass: Option<String>,
}

impl Default for MailConfig {
  fn default() -> Self {
    Self {
      host: DEFAULT_SMTP_HOST.to_string(),
      port: DEFAULT_SMTP_PORT,
      subject: DEFAULT_SUBJECT.to_string(),
      user: None,
      pass: None,
    }
  }
}

impl MailConfig {
  /// Fill credentials from `EMAIL_USER` / `EMAIL_PASS`. Unset or empty
  /// variables leave them absent; that only surfaces when a send is attempted.
  pub fn with_env(mut self) -> Self {
    let read = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
    self.user = read(USER_ENV);
    self.pass = read(PASS_ENV);
    self
  }

  pub fn has_credentials(&self) -> bool {
    self.user.is_some() && self.pass.is_some()
  }

  fn credentials(&self) -> Result<(&str, &str), FolioError> {
    match (self.user.as_deref(), self.pass.as_deref()) {
      (Some(user), Some(pass)) => Ok((user, pass)),
      _ => Err(FolioError::mail(format!("Missing credentials: set {USER_ENV} and {PASS_ENV}"))),
    }
  }

  /// The message as relayed: from and to the account owner.
  pub fn build_message(&self, submission: &ContactSubmission) -> Result<Message, FolioError> {
    let (user, _) = self.credentials()?;
    let owner: Mailbox =
      user.parse().map_err(|e| FolioError::mail(format!("Invalid {USER_ENV} address: {e}")))?;
    let message = Message::builder()
      .from(owner.clone())
      .to(owner)
      .subject(self.subject.clone())
      .header(ContentType::TEXT_PLAIN)
      .body(submission.mail_body())?;
    Ok(message)
  }
}

/// SMTP relay over implicit TLS. The transport is built per send so that
/// missing credentials fail the request rather than startup.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
  config: MailConfig,
}

impl SmtpMailer {
  pub fn new(config: MailConfig) -> Self {
    Self { config }
  }

  pub fn from_env() -> Self {
    Self::new(MailConfig::default().with_env())
  }

  pub fn config(&self) -> &MailConfig {
    &self.config
  }

  async fn deliver(&self, submission: &ContactSubmission) -> Result<(), FolioError> {
    let message = self.config.build_message(submission)?;
    let (user, pass) = self.config.credentials()?;
    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
      .port(self.config.port)
      .credentials(Credentials::new(user.to_string(), pass.to_string()))
      .build();
    transport.send(message).await?;
    tracing::info!(host = %self.config.host, "contact message relayed");
    Ok(())
  }
}

impl Mailer for SmtpMailer {
  fn send<'a>(
    &'a self,
    submission: &'a ContactSubmission,
  ) -> BoxFuture<'a, Result<(), FolioError>> {
    Box::pin(self.deliver(submission))
  }
}
