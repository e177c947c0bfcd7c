use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejection is reported as `{"error": ...}` like every
/// other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// `axum::Form` with the same rejection shape as [`JsonBody`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(Error))]
pub struct FormBody<T>(pub T);
