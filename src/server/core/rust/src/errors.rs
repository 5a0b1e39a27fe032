/* src/server/core/rust/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone)]
pub struct FolioError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" | "PAYLOAD_ERROR" => 400,
    "NOT_FOUND" => 404,
    "DICTIONARY_ERROR" | "MAIL_ERROR" | "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl FolioError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  /// A locale document is missing, unreadable or fails shape checks.
  pub fn dictionary(msg: impl Into<String>) -> Self {
    Self::with_code("DICTIONARY_ERROR", msg)
  }

  /// The outbound mail relay rejected or never received the message.
  pub fn mail(msg: impl Into<String>) -> Self {
    Self::with_code("MAIL_ERROR", msg)
  }

  /// A request body that does not decode into the expected shape.
  pub fn payload(msg: impl Into<String>) -> Self {
    Self::with_code("PAYLOAD_ERROR", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for FolioError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for FolioError {}

/// Decode failures reach us from request bodies; dictionary documents map
/// their own parse errors with the locale attached.
impl From<serde_json::Error> for FolioError {
  fn from(e: serde_json::Error) -> Self {
    Self::payload(e.to_string())
  }
}

/// The relayed message could not be assembled.
impl From<lettre::error::Error> for FolioError {
  fn from(e: lettre::error::Error) -> Self {
    Self::mail(format!("Invalid message: {e}"))
  }
}

/// The relay refused, timed out or rejected the login. The text is what the
/// contact endpoint echoes back.
impl From<lettre::transport::smtp::Error> for FolioError {
  fn from(e: lettre::transport::smtp::Error) -> Self {
    Self::mail(e.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_status_known_codes() {
    assert_eq!(default_status("VALIDATION_ERROR"), 400);
    assert_eq!(default_status("NOT_FOUND"), 404);
    assert_eq!(default_status("DICTIONARY_ERROR"), 500);
    assert_eq!(default_status("MAIL_ERROR"), 500);
    assert_eq!(default_status("INTERNAL_ERROR"), 500);
  }

  #[test]
  fn default_status_unknown_code() {
    assert_eq!(default_status("CUSTOM_ERROR"), 500);
  }

  #[test]
  fn new_explicit_status() {
    let err = FolioError::new("MAIL_ERROR", "relay down", 502);
    assert_eq!(err.code(), "MAIL_ERROR");
    assert_eq!(err.message(), "relay down");
    assert_eq!(err.status(), 502);
  }

  #[test]
  fn convenience_constructors() {
    assert_eq!(FolioError::validation("x").status(), 400);
    assert_eq!(FolioError::not_found("x").status(), 404);
    assert_eq!(FolioError::dictionary("x").code(), "DICTIONARY_ERROR");
    assert_eq!(FolioError::mail("x").code(), "MAIL_ERROR");
    assert_eq!(FolioError::payload("x").status(), 400);
    assert_eq!(FolioError::internal("x").status(), 500);
  }

  #[test]
  fn json_decode_failure_is_payload_error() {
    let err: FolioError =
      serde_json::from_str::<serde_json::Value>("not json").unwrap_err().into();
    assert_eq!(err.code(), "PAYLOAD_ERROR");
    assert_eq!(err.status(), 400);
    assert!(err.message().starts_with("expected ident"));
  }

  #[test]
  fn unbuildable_message_is_mail_error() {
    let built = lettre::Message::builder().subject("no sender").body(String::from("hi"));
    let err: FolioError = built.unwrap_err().into();
    assert_eq!(err.code(), "MAIL_ERROR");
    assert!(err.message().starts_with("Invalid message: "));
  }

  #[test]
  fn display_format() {
    let err = FolioError::mail("Invalid login");
    assert_eq!(err.to_string(), "MAIL_ERROR: Invalid login");
  }
}
