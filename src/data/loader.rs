use {
    crate::{
        config::DF,
        data::MarketDataProvider,
        domain::LoadKey,
        models::PriceSeries,
        utils::{TimeUtils, date_to_epoch_ms},
    },
    anyhow::{Context, Result},
    std::{collections::HashMap, sync::Arc},
    tokio::sync::Mutex,
};

/// Memoizing front for a market-data provider.
///
/// Entries are keyed by the exact `(symbol, start, end)` triple and live for
/// the lifetime of the loader; there is no eviction. The lock is held across
/// the fetch, so concurrent identical requests cost one upstream call.
/// Failed fetches are not cached.
pub struct DataLoader {
    provider: Box<dyn MarketDataProvider>,
    cache: Mutex<HashMap<LoadKey, Arc<PriceSeries>>>,
}

impl DataLoader {
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn load(&self, key: &LoadKey) -> Result<Arc<PriceSeries>> {
        let mut cache = self.cache.lock().await;
        if let Some(series) = cache.get(key) {
            if DF.log_cache {
                log::info!("Loader cache hit for {}", key);
            }
            return Ok(Arc::clone(series));
        }

        if key.is_empty_range() {
            let series = Arc::new(PriceSeries::from_candles(key, Vec::new()));
            cache.insert(*key, Arc::clone(&series));
            return Ok(series);
        }

        let start_ms = date_to_epoch_ms(key.start);
        let end_ms = date_to_epoch_ms(key.end) + TimeUtils::MS_IN_D - 1;
        let candles = self
            .provider
            .fetch_candles(&key.symbol.bn_name(), TimeUtils::MS_IN_D, start_ms, end_ms)
            .await
            .with_context(|| format!("{} fetch failed for {}", self.provider.name(), key))?;

        let series = Arc::new(PriceSeries::from_candles(key, candles));
        if DF.log_cache {
            log::info!(
                "Loader cache miss for {}: fetched {} {} rows from {}",
                key,
                series.len(),
                TimeUtils::interval_to_string(TimeUtils::MS_IN_D),
                self.provider.name()
            );
        }
        cache.insert(*key, Arc::clone(&series));
        Ok(series)
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::testing::{CountingProvider, FailingProvider};
    use crate::domain::Symbol;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn identical_keys_hit_the_network_once() {
        let provider = CountingProvider::default();
        let loader = DataLoader::new(Box::new(provider.clone()));
        let key = LoadKey::new(Symbol::BtcUsd, ymd(2018, 1, 1), ymd(2018, 3, 1));

        let first = loader.load(&key).await.unwrap();
        let second = loader.load(&key).await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.cached_entries().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_identical_loads_share_one_fetch() {
        let provider = CountingProvider::default();
        let loader = Arc::new(DataLoader::new(Box::new(provider.clone())));
        let key = LoadKey::new(Symbol::EthUsd, ymd(2018, 1, 1), ymd(2019, 1, 1));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loader = Arc::clone(&loader);
                tokio::spawn(async move { loader.load(&key).await })
            })
            .collect();

        let mut loaded = Vec::new();
        for handle in handles {
            loaded.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(provider.calls(), 1);
        assert!(loaded.iter().all(|s| Arc::ptr_eq(s, &loaded[0])));
        assert_eq!(loader.cached_entries().await, 1);
    }

    #[tokio::test]
    async fn distinct_keys_are_fetched_separately() {
        let provider = CountingProvider::default();
        let loader = DataLoader::new(Box::new(provider.clone()));
        let start = ymd(2019, 1, 1);
        let end = ymd(2019, 2, 1);

        loader.load(&LoadKey::new(Symbol::BtcUsd, start, end)).await.unwrap();
        loader.load(&LoadKey::new(Symbol::EthUsd, start, end)).await.unwrap();
        loader.load(&LoadKey::new(Symbol::EthUsd, ymd(2019, 1, 2), end)).await.unwrap();

        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn loaded_dates_are_monotonic_and_inside_the_range() {
        let loader = DataLoader::new(Box::new(CountingProvider::default()));
        let key = LoadKey::new(Symbol::AdaUsd, ymd(2020, 2, 1), ymd(2020, 4, 30));

        let series = loader.load(&key).await.unwrap();

        assert_eq!(series.first_date(), Some(key.start));
        assert_eq!(series.last_date(), Some(key.end));
        assert!(series.dates.windows(2).all(|w| w[0] <= w[1]));
        assert!(series.dates.iter().all(|d| *d <= key.end));
    }

    #[tokio::test]
    async fn start_after_end_yields_an_empty_series() {
        let provider = CountingProvider::default();
        let loader = DataLoader::new(Box::new(provider.clone()));
        let key = LoadKey::new(Symbol::BtcUsd, ymd(2030, 1, 1), ymd(2020, 1, 1));
        assert!(loader.load(&key).await.unwrap().is_empty());
        assert_eq!(provider.calls(), 0);
        assert_eq!(loader.cached_entries().await, 1);
    }

    #[tokio::test]
    async fn failures_propagate_and_are_not_cached() {
        let loader = DataLoader::new(Box::new(FailingProvider));
        let key = LoadKey::new(Symbol::BtcUsd, ymd(2018, 1, 1), ymd(2018, 1, 10));

        let err = loader.load(&key).await.unwrap_err();
        assert!(format!("{:#}", err).contains("network unreachable"));
        assert_eq!(loader.cached_entries().await, 0);
    }
}
