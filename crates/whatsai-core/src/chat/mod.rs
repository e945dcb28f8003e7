//! Per-contact conversation state.

pub mod history;
