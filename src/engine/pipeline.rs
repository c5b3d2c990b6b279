use {
    crate::{
        analysis::Forecaster,
        config::{DASHBOARD, DF, HorizonYears},
        data::DataLoader,
        domain::{LoadKey, Symbol},
        models::{ForecastResult, PriceSeries, TrainingFrame},
    },
    anyhow::{Context, Result},
    chrono::NaiveDate,
    std::sync::Arc,
};

/// The three controls on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DashboardInputs {
    pub symbol: Symbol,
    pub start: NaiveDate,
    pub horizon: HorizonYears,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        let (y, m, d) = DASHBOARD.default_start;
        Self {
            symbol: Symbol::default(),
            start: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            horizon: HorizonYears::default(),
        }
    }
}

impl DashboardInputs {
    /// Data always runs through `today`; the horizon never affects the load.
    pub fn load_key(&self, today: NaiveDate) -> LoadKey {
        LoadKey::new(self.symbol, self.start, today)
    }
}

/// Everything one render of the dashboard needs.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub inputs: DashboardInputs,
    pub key: LoadKey,
    pub series: Arc<PriceSeries>,
    pub forecast: ForecastResult,
}

/// load -> adapt -> fit -> predict. Loader and forecaster errors propagate
/// with the load key attached.
pub async fn run_pipeline<F: Forecaster>(
    loader: &DataLoader,
    forecaster: &F,
    inputs: &DashboardInputs,
    today: NaiveDate,
) -> Result<DashboardRun> {
    let key = inputs.load_key(today);
    if DF.log_inputs {
        log::info!("Pipeline run for {} with horizon {}", key, inputs.horizon);
    }

    let series = loader.load(&key).await?;
    let frame = TrainingFrame::from_series(&series);

    let model = forecaster
        .fit(&frame)
        .with_context(|| format!("Failed to fit {} rows for {}", frame.len(), key))?;
    let forecast = forecaster
        .predict(&model, inputs.horizon.periods())
        .with_context(|| format!("Failed to predict {} for {}", inputs.horizon, key))?;

    Ok(DashboardRun {
        inputs: *inputs,
        key,
        series,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{AdditiveForecaster, ForecastError},
        data::provider::testing::CountingProvider,
    };

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn btc_from_2018(years: u32) -> DashboardInputs {
        DashboardInputs {
            symbol: Symbol::BtcUsd,
            start: ymd(2018, 1, 1),
            horizon: HorizonYears::new(years),
        }
    }

    #[test]
    fn default_inputs_match_the_controls() {
        assert_eq!(DashboardInputs::default(), btc_from_2018(1));
    }

    #[tokio::test]
    async fn btc_one_year_forecast_from_2018() {
        let today = ymd(2020, 6, 30);
        let loader = DataLoader::new(Box::new(CountingProvider::default()));
        let run = run_pipeline(&loader, &AdditiveForecaster::default(), &btc_from_2018(1), today)
            .await
            .unwrap();

        assert_eq!(run.key, LoadKey::new(Symbol::BtcUsd, ymd(2018, 1, 1), today));
        assert_eq!(run.series.first_date(), Some(ymd(2018, 1, 1)));
        assert_eq!(run.series.last_date(), Some(today));
        assert_eq!(run.forecast.history_len, run.series.len());
        assert_eq!(run.forecast.future().len(), 365);
        assert_eq!(run.forecast.future()[0].ds, ymd(2020, 7, 1));
    }

    #[tokio::test]
    async fn changing_only_the_horizon_reuses_the_load() {
        let today = ymd(2019, 3, 1);
        let provider = CountingProvider::default();
        let loader = DataLoader::new(Box::new(provider.clone()));
        let forecaster = AdditiveForecaster::default();

        let one = run_pipeline(&loader, &forecaster, &btc_from_2018(1), today).await.unwrap();
        let four = run_pipeline(&loader, &forecaster, &btc_from_2018(4), today).await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert!(Arc::ptr_eq(&one.series, &four.series));
        assert_eq!(four.forecast.future().len(), 4 * 365);

        let eth = DashboardInputs {
            symbol: Symbol::EthUsd,
            ..btc_from_2018(1)
        };
        run_pipeline(&loader, &forecaster, &eth, today).await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn start_after_today_fails_in_the_forecaster() {
        let today = ymd(2021, 1, 1);
        let loader = DataLoader::new(Box::new(CountingProvider::default()));
        let inputs = DashboardInputs {
            start: ymd(2022, 1, 1),
            ..btc_from_2018(1)
        };

        let err = run_pipeline(&loader, &AdditiveForecaster::default(), &inputs, today)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ForecastError>(),
            Some(ForecastError::InsufficientData { rows: 0, .. })
        ));
        assert_eq!(loader.cached_entries().await, 1);
    }
}
