//! HTTP/REST API layer for WhatsAi.
//!
//! Axum-based REST API at `/api/v1/` serving dashboard state, plus the
//! webhook the WhatsApp bridge pushes events to. Optional token
//! authentication, envelope response format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;
