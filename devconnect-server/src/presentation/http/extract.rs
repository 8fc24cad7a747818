//! Extractors whose rejections render through [`AppError`], so malformed
//! bodies and ids get the same JSON shapes as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::presentation::http::app_error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct AppPath<T>(pub(crate) T);
