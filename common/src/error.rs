//! Error taxonomy for the discovery engine.
//!
//! Per-attempt failures ([`ProbeError`]) never leave the prober; they only
//! steer it to the next stage or port. [`ScanError`] is what a caller of the
//! scanner can actually observe.

use thiserror::Error;

/// Why a single probe attempt (one stage on one port) did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The attempt ran past its deadline.
    #[error("probe attempt timed out")]
    Timeout,
    /// Connection refused, no route, reset, or an unparseable reply.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),
    /// The scan's cancellation token fired while the attempt was in flight.
    #[error("probe attempt aborted")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Cancellation observed at a wave boundary. Ends a scan cleanly, it is
    /// never yielded as a stream item.
    #[error("scan aborted by caller")]
    Aborted,
    #[error("invalid scan settings: {0}")]
    InvalidSettings(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// Anything the scan machinery did not anticipate.
    #[error("unexpected scan failure: {0}")]
    Defect(String),
}

impl ScanError {
    /// Defects are the only errors a caller is expected to report as a failed scan.
    pub fn is_defect(&self) -> bool {
        matches!(self, ScanError::InvalidSettings(_) | ScanError::Defect(_))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}
