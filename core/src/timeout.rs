//! Deadline racing for probe attempts.
//!
//! Whichever side loses the race is dropped on the spot: an elapsed deadline
//! drops the operation (and with it any socket it holds), a finished
//! operation drops the timer.

use std::future::Future;
use std::time::Duration;

use roomfinder_common::error::ProbeError;
use tokio_util::sync::CancellationToken;

/// Runs `op` to completion unless `deadline` elapses first.
pub async fn with_deadline<F, T>(deadline: Duration, op: F) -> Result<T, ProbeError>
where
    F: Future<Output = Result<T, ProbeError>>,
{
    match tokio::time::timeout(deadline, op).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ProbeError::Timeout),
    }
}

/// Like [`with_deadline`], but also gives up as soon as `cancel` fires.
pub async fn race<F, T>(
    deadline: Duration,
    cancel: &CancellationToken,
    op: F,
) -> Result<T, ProbeError>
where
    F: Future<Output = Result<T, ProbeError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProbeError::Aborted),
        result = with_deadline(deadline, op) => result,
    }
}
