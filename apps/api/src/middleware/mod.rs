//! Request extractors for the tunebridge API
//!
//! - `JsonBody`: JSON body parsed regardless of `Content-Type`

pub mod json_body;

pub use json_body::JsonBody;
