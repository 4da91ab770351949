use std::time::Duration;

use crate::data::PriceUpdate;
use crate::request::{FetchError, PriceSource, fetch_all};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based), doubling up to the cap.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Runs [`fetch_all`] until it succeeds or the policy runs out of attempts.
/// The last error is returned.
pub async fn fetch_all_with_retry<S>(
    source: &S,
    policy: RetryPolicy,
) -> Result<PriceUpdate, FetchError>
where
    S: PriceSource + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match fetch_all(source).await {
            Ok(update) => return Ok(update),
            Err(err) if attempt < attempts => {
                let delay = policy.backoff(attempt - 1);
                log::warn!(
                    "price fetch attempt {attempt}/{attempts} failed: {err}; retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                log::error!("price fetch gave up after {attempts} attempts: {err}");
                return Err(err);
            }
        }
    }
}
