//! Request deadlines.
//!
//! A `Deadline` is a fixed time budget raced against the transport
//! future. On expiry the caller receives `ApiError::Timeout`
//! immediately and the raced future is dropped; a late completion has
//! no observable effect.

use std::future::Future;
use std::time::Duration;

use super::error::ApiError;

/// Default deadline for read (GET) calls.
pub const READ_DEADLINE: Deadline = Deadline::from_secs(15);

/// Default deadline for write (POST) calls.
pub const WRITE_DEADLINE: Deadline = Deadline::from_secs(30);

/// A time budget for one outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Duration);

impl Deadline {
    /// Creates a deadline from a duration.
    pub const fn new(budget: Duration) -> Self {
        Self(budget)
    }

    /// Creates a deadline of whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// The time budget.
    pub fn budget(&self) -> Duration {
        self.0
    }

    /// Races `operation` against this deadline.
    ///
    /// Returns the operation's own result if it settles in time, and
    /// `ApiError::Timeout` otherwise.
    pub async fn race<T>(
        &self,
        operation: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match tokio::time::timeout(self.0, operation).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        }
    }
}
