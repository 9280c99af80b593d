//! Core types shared across Quill crates
//!
//! This crate provides foundational types used by both the error and the
//! logging crates:
//!
//! - **Correlation types**: RequestId, WatcherId
//! - **Schema constants**: Canonical field keys and encoder keys

pub mod correlation;
pub mod schema;

pub use correlation::{RequestId, WatcherId};
