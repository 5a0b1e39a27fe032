/* src/server/adapter/axum/src/handler/contact.rs */

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header;
use folio_server::{ContactResponse, ContactSubmission, FolioError};

use super::AppState;
use crate::error::AxumError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `POST /api/contact`: relay the submission by mail. The script posts JSON;
/// a plain form submit posts url-encoded fields. Fields are not validated
/// here; any failure, including an unreadable body, is a 500.
pub(super) async fn handle_contact(
  State(state): State<Arc<AppState>>,
  req: Request,
) -> Result<axum::Json<ContactResponse>, AxumError> {
  let result = async {
    let submission = read_submission(req).await?;
    state.mailer.send(&submission).await
  }
  .await;

  match result {
    Ok(()) => Ok(axum::Json(ContactResponse::sent())),
    Err(e) => {
      tracing::error!(error = %e, "Error sending email");
      // The client sees the raw error text, always as a server error.
      Err(FolioError::new(e.code(), e.message(), 500).into())
    }
  }
}

async fn read_submission(req: Request) -> Result<ContactSubmission, FolioError> {
  if is_form(&req) {
    let axum::Form(submission) = axum::Form::<ContactSubmission>::from_request(req, &())
      .await
      .map_err(|rejection| FolioError::payload(rejection.body_text()))?;
    return Ok(submission);
  }

  let body = Bytes::from_request(req, &())
    .await
    .map_err(|rejection| FolioError::payload(rejection.body_text()))?;
  Ok(serde_json::from_slice(&body)?)
}

fn is_form(req: &Request) -> bool {
  req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
}
