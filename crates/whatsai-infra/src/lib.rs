//! Infrastructure layer for WhatsAi.
//!
//! Contains implementations of the port traits defined in `whatsai-core`:
//! the OpenAI-compatible text-generation provider and the HTTP transport to
//! the WhatsApp bridge sidecar. Also owns config-file loading, environment
//! secrets, and data-directory resolution.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
pub mod whatsapp;
