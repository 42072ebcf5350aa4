//! Business logic services for tunebridge
//!
//! - Catalog session (one client for the process lifetime)
//! - Normalization of raw catalog records
//! - Catalog diagnostics for the readiness probe

pub mod diagnostics;
pub mod normalizer;
pub mod session;

pub use diagnostics::{DiagnosticsReport, DiagnosticsService, DiagnosticsStatus, ProbeOutcome};
pub use session::CatalogSession;
