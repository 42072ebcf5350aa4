//! Common test utilities for API integration tests
//!
//! Shared infrastructure: an in-memory catalog stub, raw record builders,
//! and helpers for driving the router.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
