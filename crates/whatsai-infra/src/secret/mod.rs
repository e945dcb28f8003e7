//! Secret resolution.
//!
//! The backend API key is only ever read from the environment and held as a
//! [`secrecy::SecretString`] from that point on.

pub mod env;

pub use env::{API_KEY_VARS, resolve_api_key};
