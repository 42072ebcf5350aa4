//! Catalog diagnostics
//!
//! Runs a couple of live probes against the catalog so operators can tell
//! "no playlists" apart from "playlist access denied":
//! - search: a known query must return results
//! - playlists: the library must be readable (only when authenticated)

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};
use tunebridge_catalog_client::SearchFilter;

use super::session::CatalogSession;

/// Query used to check that search works end to end
pub const PROBE_QUERY: &str = "Oasis Wonderwall";
const PROBE_SEARCH_LIMIT: u32 = 3;
const PROBE_PLAYLIST_LIMIT: u32 = 1;

/// Outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// Probe succeeded and returned `items` records
    Ok { items: usize },
    /// Probe succeeded but returned nothing useful
    Degraded { reason: String },
    /// Probe call failed
    Failed { error: String },
    /// Probe not applicable
    Skipped { reason: String },
}

impl ProbeOutcome {
    fn from_count(items: usize, empty_reason: &str) -> Self {
        if items == 0 {
            Self::Degraded {
                reason: empty_reason.to_string(),
            }
        } else {
            Self::Ok { items }
        }
    }

    fn is_problem(&self) -> bool {
        matches!(self, Self::Degraded { .. } | Self::Failed { .. })
    }
}

/// A named probe result
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub name: &'static str,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    pub response_time_ms: u64,
}

impl ProbeResult {
    fn new(name: &'static str, outcome: ProbeOutcome, elapsed: Duration) -> Self {
        Self {
            name,
            outcome,
            response_time_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Overall diagnostics status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Aggregated diagnostics report
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub status: DiagnosticsStatus,
    pub ytmusic_initialized: bool,
    pub authenticated: bool,
    pub checks: Vec<ProbeResult>,
    pub total_time_ms: u64,
    pub version: &'static str,
}

impl DiagnosticsReport {
    fn new(session: &CatalogSession, checks: Vec<ProbeResult>, total_time: Duration) -> Self {
        let search_failed = checks
            .iter()
            .any(|c| c.name == "search" && matches!(c.outcome, ProbeOutcome::Failed { .. }));

        let status = if !session.is_ready() || search_failed {
            DiagnosticsStatus::Unhealthy
        } else if checks.iter().any(|c| c.outcome.is_problem()) {
            DiagnosticsStatus::Degraded
        } else {
            DiagnosticsStatus::Healthy
        };

        Self {
            status,
            ytmusic_initialized: session.is_ready(),
            authenticated: session.is_authenticated(),
            checks,
            total_time_ms: total_time.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Unhealthy means the gateway cannot serve searches
    pub fn is_unhealthy(&self) -> bool {
        self.status == DiagnosticsStatus::Unhealthy
    }
}

/// Runs catalog probes for the readiness endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticsService;

impl DiagnosticsService {
    pub fn new() -> Self {
        Self
    }

    /// Probe the catalog through the session's client
    pub async fn run(&self, session: &CatalogSession) -> DiagnosticsReport {
        let start = Instant::now();

        let checks = match session.client() {
            Ok(_) => {
                let (search, playlists) =
                    tokio::join!(self.check_search(session), self.check_playlists(session));
                vec![search, playlists]
            }
            Err(_) => Vec::new(),
        };

        let report = DiagnosticsReport::new(session, checks, start.elapsed());
        debug!(status = ?report.status, total_time_ms = report.total_time_ms, "Diagnostics complete");
        report
    }

    async fn check_search(&self, session: &CatalogSession) -> ProbeResult {
        let start = Instant::now();
        let outcome = match session.client() {
            Ok(client) => match client
                .search(PROBE_QUERY, SearchFilter::Songs, PROBE_SEARCH_LIMIT)
                .await
            {
                Ok(tracks) => ProbeOutcome::from_count(tracks.len(), "search returned no results"),
                Err(e) => {
                    warn!(error = %e, "Search probe failed");
                    ProbeOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            },
            Err(e) => ProbeOutcome::Failed {
                error: e.to_string(),
            },
        };
        ProbeResult::new("search", outcome, start.elapsed())
    }

    async fn check_playlists(&self, session: &CatalogSession) -> ProbeResult {
        let start = Instant::now();

        if !session.is_authenticated() {
            return ProbeResult::new(
                "playlists",
                ProbeOutcome::Skipped {
                    reason: "session is not authenticated".to_string(),
                },
                start.elapsed(),
            );
        }

        let outcome = match session.client() {
            Ok(client) => match client.list_playlists(PROBE_PLAYLIST_LIMIT).await {
                Ok(playlists) => {
                    ProbeOutcome::from_count(playlists.len(), "library has no playlists")
                }
                Err(e) => {
                    warn!(error = %e, "Playlist probe failed");
                    ProbeOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            },
            Err(e) => ProbeOutcome::Failed {
                error: e.to_string(),
            },
        };
        ProbeResult::new("playlists", outcome, start.elapsed())
    }
}
