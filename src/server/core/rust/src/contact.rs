/* src/server/core/rust/src/contact.rs */

//! Contact form model: the transient submission, its field rules, and the
//! submit flow shared by every client of `POST /api/contact`.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::BoxFuture;
use crate::dictionary::{FieldErrorText, FormText, SubmitText};
use crate::errors::FolioError;

/// Native `pattern` attribute value for the phone input.
pub const PHONE_PATTERN: &str = "[0-9]{11,14}";
pub const MESSAGE_MIN_LEN: usize = 10;
pub const SENT_MESSAGE: &str = "Email sent successfully!";

fn phone_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(&format!("^{PHONE_PATTERN}$")).expect("valid phone pattern"))
}

// Same address grammar browsers apply to `<input type="email">`.
fn email_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(concat!(
      r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
      r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
      r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("valid email pattern")
  })
}

/// Wire shape of the form. Missing fields deserialize as empty strings: the
/// relay endpoint accepts whatever the client sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmission {
  pub full_name: String,
  pub email: String,
  pub phone_number: String,
  pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
  FullName,
  Email,
  PhoneNumber,
  Message,
}

impl ContactField {
  pub const ALL: [ContactField; 4] =
    [ContactField::FullName, ContactField::Email, ContactField::PhoneNumber, ContactField::Message];

  /// Wire and input `name`.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::FullName => "fullName",
      Self::Email => "email",
      Self::PhoneNumber => "phoneNumber",
      Self::Message => "message",
    }
  }
}

/// At most one message per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(ContactField, String)>);

impl ValidationErrors {
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn get(&self, field: ContactField) -> Option<&str> {
    self.0.iter().find(|(f, _)| *f == field).map(|(_, msg)| msg.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
    self.0.iter().map(|(f, msg)| (*f, msg.as_str()))
  }
}

impl ContactSubmission {
  pub fn value(&self, field: ContactField) -> &str {
    match field {
      ContactField::FullName => &self.full_name,
      ContactField::Email => &self.email,
      ContactField::PhoneNumber => &self.phone_number,
      ContactField::Message => &self.message,
    }
  }

  pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
    let slot = match field {
      ContactField::FullName => &mut self.full_name,
      ContactField::Email => &mut self.email,
      ContactField::PhoneNumber => &mut self.phone_number,
      ContactField::Message => &mut self.message,
    };
    *slot = value.into();
  }

  /// Check one field; the message comes from the active dictionary.
  pub fn check(&self, field: ContactField, text: &FieldErrorText) -> Option<String> {
    let value = self.value(field);
    let failure = match field {
      ContactField::FullName => value.is_empty().then_some(&text.full_name),
      ContactField::Email if value.is_empty() => Some(&text.email.required),
      ContactField::Email => (!email_re().is_match(value)).then_some(&text.email.invalid_email),
      ContactField::PhoneNumber if value.is_empty() => Some(&text.phone_number.required),
      ContactField::PhoneNumber => {
        (!phone_re().is_match(value)).then_some(&text.phone_number.invalid_number)
      }
      ContactField::Message if value.is_empty() => Some(&text.message.required),
      ContactField::Message => {
        (value.chars().count() < MESSAGE_MIN_LEN).then_some(&text.message.min_length)
      }
    };
    failure.cloned()
  }

  pub fn validate(&self, text: &FieldErrorText) -> Result<(), ValidationErrors> {
    let errors: Vec<_> = ContactField::ALL
      .into_iter()
      .filter_map(|field| self.check(field, text).map(|msg| (field, msg)))
      .collect();
    if errors.is_empty() { Ok(()) } else { Err(ValidationErrors(errors)) }
  }

  /// Plain-text mail body relayed to the site owner.
  pub fn mail_body(&self) -> String {
    format!(
      "You have a new message:\n\nName: {}\nEmail: {}\nPhone: {}\nMessage: {}",
      self.full_name, self.email, self.phone_number, self.message
    )
  }
}

/// Response body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
  pub success: bool,
  pub message: String,
}

impl ContactResponse {
  pub fn sent() -> Self {
    Self { success: true, message: SENT_MESSAGE.to_string() }
  }

  pub fn failed(message: impl Into<String>) -> Self {
    Self { success: false, message: message.into() }
  }
}

/// What came back from one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReply {
  pub status: u16,
  pub body: Option<ContactResponse>,
}

impl ContactReply {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// Sends one submission to the relay endpoint.
pub trait ContactTransport: Send + Sync {
  fn post<'a>(
    &'a self,
    submission: &'a ContactSubmission,
  ) -> BoxFuture<'a, Result<ContactReply, FolioError>>;
}

/// User-facing reactions to a submit.
pub trait Feedback {
  fn success(&mut self, message: &str);
  fn error(&mut self, message: &str);
  fn celebrate(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Invalid(ValidationErrors),
  /// A submit is already in flight.
  Busy,
  Sent,
  Failed,
}

/// Local draft state of one form instance.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
  draft: ContactSubmission,
  sending: bool,
}

impl ContactForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_draft(draft: ContactSubmission) -> Self {
    Self { draft, sending: false }
  }

  pub fn draft(&self) -> &ContactSubmission {
    &self.draft
  }

  pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
    self.draft.set(field, value);
  }

  pub fn is_sending(&self) -> bool {
    self.sending
  }

  pub fn can_submit(&self, text: &FieldErrorText) -> bool {
    !self.sending && self.draft.validate(text).is_ok()
  }

  pub fn submit_label<'a>(&self, text: &'a SubmitText) -> &'a str {
    if self.sending { &text.sending } else { &text.submit }
  }

  /// Enter the sending state and hand out the payload, or report why not.
  pub fn begin(&mut self, text: &FieldErrorText) -> Result<ContactSubmission, SubmitOutcome> {
    if self.sending {
      return Err(SubmitOutcome::Busy);
    }
    self.draft.validate(text).map_err(SubmitOutcome::Invalid)?;
    self.sending = true;
    Ok(self.draft.clone())
  }

  /// Leave the sending state; a successful send clears the draft.
  pub fn finish(&mut self, sent: bool) {
    self.sending = false;
    if sent {
      self.draft = ContactSubmission::default();
    }
  }

  /// One full submit: validate, POST once, report through `feedback`.
  pub async fn submit(
    &mut self,
    text: &FormText,
    transport: &dyn ContactTransport,
    feedback: &mut dyn Feedback,
  ) -> SubmitOutcome {
    let submission = match self.begin(&text.errors) {
      Ok(submission) => submission,
      Err(outcome) => return outcome,
    };

    let sent = match transport.post(&submission).await {
      Ok(reply) if reply.is_success() => true,
      Ok(reply) => {
        tracing::warn!(status = reply.status, "contact relay rejected submission");
        false
      }
      Err(e) => {
        tracing::warn!(error = %e, "contact relay unreachable");
        false
      }
    };

    self.finish(sent);
    if sent {
      feedback.success(&text.messages.success);
      feedback.celebrate();
      SubmitOutcome::Sent
    } else {
      feedback.error(&text.messages.error);
      SubmitOutcome::Failed
    }
  }
}
