//! Route handlers, one module per resource.

pub mod activity;
pub mod contacts;
pub mod personality;
pub mod preview;
pub mod status;
pub mod training;
pub mod webhook;
