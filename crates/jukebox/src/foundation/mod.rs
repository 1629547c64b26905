//! Foundation module - Core utilities shared by the rest of the crate
//!
//! - Logging utilities

pub mod logging;
