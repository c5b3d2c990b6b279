use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::utils::AppInstant;

const WINDOW: Duration = Duration::from_secs(60);

/// Shared request-weight budget, refilled every 60 seconds.
#[derive(Clone)]
pub struct GlobalRateLimiter {
    inner: Arc<Mutex<Window>>,
}

struct Window {
    opened_at: AppInstant,
    used_weight: u32,
    limit: u32,
}

impl GlobalRateLimiter {
    pub(crate) fn new(limit: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Window {
                opened_at: AppInstant::now(),
                used_weight: 0,
                limit,
            })),
        }
    }

    /// Waits until `cost` weight fits into the current window, then spends it.
    pub(crate) async fn acquire(&self, cost: u32, context: &str) {
        loop {
            let wait = {
                let mut window = self.inner.lock().await;
                let elapsed = window.opened_at.elapsed();
                if elapsed >= WINDOW {
                    window.opened_at = AppInstant::now();
                    window.used_weight = 0;
                }

                // A single request heavier than the whole budget would never fit.
                if window.used_weight == 0 || window.used_weight + cost <= window.limit {
                    window.used_weight += cost;
                    return;
                }

                log::warn!(
                    "🛑 Rate limit saturated for [{}]. Used: {}/{}.",
                    context,
                    window.used_weight,
                    window.limit
                );
                WINDOW.saturating_sub(elapsed) + Duration::from_millis(100)
            };

            tokio::time::sleep(wait).await;
        }
    }

    #[cfg(test)]
    async fn used_weight(&self) -> u32 {
        self.inner.lock().await.used_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spends_weight_within_budget() {
        let limiter = GlobalRateLimiter::new(10);
        limiter.acquire(4, "test").await;
        limiter.acquire(6, "test").await;
        assert_eq!(limiter.used_weight().await, 10);
    }

    #[tokio::test]
    async fn oversized_request_goes_through_on_a_fresh_window() {
        let limiter = GlobalRateLimiter::new(2);
        limiter.acquire(5, "test").await;
        assert_eq!(limiter.used_weight().await, 5);
    }
}
