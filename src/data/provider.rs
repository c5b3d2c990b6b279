use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::{BINANCE, BaseVol, ClosePrice, HighPrice, LowPrice, OpenPrice};
use crate::data::{GlobalRateLimiter, load_klines};
use crate::domain::Candle;
use crate::utils::TimeUtils;

/// Abstract interface for fetching market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch candles for a pair whose open time falls in `[start_ms, end_ms]`.
    async fn fetch_candles(
        &self,
        pair: &str,
        interval_ms: i64,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>>;

    /// Short label for logs and the status line.
    fn name(&self) -> &'static str;
}

pub struct BinanceProvider {
    limiter: GlobalRateLimiter,
}

impl BinanceProvider {
    pub fn new() -> Self {
        Self {
            limiter: GlobalRateLimiter::new(BINANCE.limits.weight_limit_minute),
        }
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for BinanceProvider {
    async fn fetch_candles(
        &self,
        pair: &str,
        interval_ms: i64,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>> {
        let klines = load_klines(pair, interval_ms, start_ms, end_ms, &self.limiter).await?;
        klines
            .into_iter()
            .map(Candle::try_from)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Malformed kline from Binance for {}", pair))
    }

    fn name(&self) -> &'static str {
        "Binance"
    }
}

/// Offline provider: a deterministic synthetic price path per pair.
/// Drift, a yearly cycle and a weekday pattern, so every model component has
/// something to find.
pub struct DemoProvider;

impl DemoProvider {
    fn seed(pair: &str) -> f64 {
        pair.bytes().map(f64::from).sum::<f64>()
    }

    fn close_on_day(seed: f64, day: i64) -> f64 {
        let d = day as f64;
        let base = 50.0 + (seed % 100.0) * 10.0;
        let drift = 1.0 + 0.0004 * d;
        let yearly = 1.0 + 0.12 * (2.0 * std::f64::consts::PI * d / 365.25).sin();
        let weekly = 1.0 + 0.01 * (2.0 * std::f64::consts::PI * (d + seed) / 7.0).cos();
        let wobble = 1.0 + 0.02 * (d * 0.37 + seed).sin() * (d * 0.11).cos();
        base * drift * yearly * weekly * wobble
    }
}

#[async_trait]
impl MarketDataProvider for DemoProvider {
    async fn fetch_candles(
        &self,
        pair: &str,
        interval_ms: i64,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>> {
        anyhow::ensure!(interval_ms == TimeUtils::MS_IN_D, "demo data is daily only");
        let seed = Self::seed(pair);
        let first_day = start_ms.div_euclid(interval_ms);
        let last_day = end_ms.div_euclid(interval_ms);

        let candles = (first_day..=last_day)
            .map(|day| {
                let close = Self::close_on_day(seed, day);
                let open = Self::close_on_day(seed, day - 1);
                let spread = close.max(open) * 0.015;
                Candle::new(
                    day * interval_ms,
                    OpenPrice::new(open),
                    HighPrice::new(close.max(open) + spread),
                    LowPrice::new(close.min(open) - spread),
                    ClosePrice::new(close),
                    BaseVol::new(1_000.0 + 250.0 * ((day as f64) * 0.21).sin().abs()),
                )
            })
            .collect();
        Ok(candles)
    }

    fn name(&self) -> &'static str {
        "Demo"
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Wraps the demo provider and counts upstream calls.
    #[derive(Clone, Default)]
    pub(crate) struct CountingProvider {
        pub(crate) calls: Arc<AtomicUsize>,
    }

    impl CountingProvider {
        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarketDataProvider for CountingProvider {
        async fn fetch_candles(
            &self,
            pair: &str,
            interval_ms: i64,
            start_ms: i64,
            end_ms: i64,
        ) -> Result<Vec<Candle>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Suspend mid-fetch so concurrent callers actually overlap
            tokio::task::yield_now().await;
            DemoProvider
                .fetch_candles(pair, interval_ms, start_ms, end_ms)
                .await
        }

        fn name(&self) -> &'static str {
            "Counting"
        }
    }

    /// Always fails, like an unreachable API.
    pub(crate) struct FailingProvider;

    #[async_trait]
    impl MarketDataProvider for FailingProvider {
        async fn fetch_candles(&self, pair: &str, _: i64, _: i64, _: i64) -> Result<Vec<Candle>> {
            anyhow::bail!("network unreachable while fetching {}", pair)
        }

        fn name(&self) -> &'static str {
            "Failing"
        }
    }
}
