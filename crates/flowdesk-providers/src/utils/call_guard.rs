//! Per-call deadline and cancellation
//!
//! Wraps any repository future so that a timeout or a cancellation signal
//! surfaces as `ConnectionFailure` instead of a partial result.
//!
//! ## Example
//!
//! ```ignore
//! use flowdesk_providers::utils::CallGuard;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let guard = CallGuard::new()
//!     .with_timeout(Duration::from_secs(2))
//!     .with_cancellation(token.clone());
//! let found = guard.run("read", repo.read(&key)).await?;
//! ```

use flowdesk_domain::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation applied to one call
#[derive(Debug, Clone, Default)]
pub struct CallGuard {
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl CallGuard {
    /// Guard with neither deadline nor cancellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call once `timeout` elapses
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Deadline from milliseconds; 0 disables it
    #[must_use]
    pub fn with_timeout_ms(self, timeout_ms: u64) -> Self {
        if timeout_ms == 0 {
            self
        } else {
            self.with_timeout(Duration::from_millis(timeout_ms))
        }
    }

    /// Fail the call once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Configured deadline, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Drive `call` to completion within the guard's limits
    ///
    /// `operation` names the call in the error message.
    pub async fn run<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                    Error::connection_failure(format!("{operation} timed out after {limit:?}"))
                })?,
                None => call.await,
            }
        };

        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    Err(Error::connection_failure(format!("{operation} was cancelled")))
                }
                result = bounded => result,
            },
            None => bounded.await,
        }
    }
}
