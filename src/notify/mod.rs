//! Boot notification over an HTTP webhook.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Fire-once liveness announcements ([`Notifier`])

mod client;
mod error;
mod http;
mod notifier;


pub use client::ReqwestClient;
pub use error::{HttpError, NotifyError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use notifier::{MAX_CONTENT_CHARS, Notifier, NotifyOutcome};
