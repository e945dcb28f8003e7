//! Shared domain types for WhatsAi.
//!
//! This crate contains the core domain types used across the WhatsAi
//! workspace: conversation turns, personalities, bot status, LLM request
//! shapes, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror, schemars.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod personality;
pub mod status;
