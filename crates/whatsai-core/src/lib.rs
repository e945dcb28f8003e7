//! Business logic and port traits for WhatsAi.
//!
//! This crate defines the "ports" (LLM provider and message transport
//! traits) that the infrastructure layer implements, plus the reply
//! orchestration built on top of them. It depends only on `whatsai-types`
//! -- never on `whatsai-infra` or any network crate.

pub mod chat;
pub mod context;
pub mod generation;
pub mod llm;
pub mod orchestrator;
pub mod personality;
pub mod prompt;
pub mod status;
pub mod training;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;
