use {
    crate::{
        analysis::{ForecastError, Forecaster},
        config::{DF, FORECAST, ForecastConfig, SeasonalityConfig},
        models::{ForecastResult, ForecastRow, SeasonalProfiles, TrainingFrame},
        utils::{days_since_epoch, mean_and_stddev},
    },
    chrono::{Days, NaiveDate},
    nalgebra::{DMatrix, DVector},
    statrs::distribution::{ContinuousCDF, Normal},
    std::f64::consts::PI,
};

const MIN_HISTORY_ROWS: usize = 2;

// 1970-01-05, the first Monday after the epoch.
const FIRST_MONDAY_EPOCH_DAY: f64 = 4.0;
// 2017-01-01, a non-leap year used to draw the yearly profile.
const PROFILE_YEAR_EPOCH_DAY: f64 = 17_167.0;

fn push_fourier_features(day: f64, period_days: f64, order: usize, out: &mut Vec<f64>) {
    for k in 1..=order {
        let x = 2.0 * PI * k as f64 * day / period_days;
        out.push(x.sin());
        out.push(x.cos());
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SeasonalTerm {
    period_days: f64,
    /// (sin, cos) coefficient pairs, order 1 first
    betas: Vec<f64>,
}

impl SeasonalTerm {
    fn value(&self, day: f64) -> f64 {
        self.betas
            .chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| {
                let x = 2.0 * PI * (i + 1) as f64 * day / self.period_days;
                pair[0] * x.sin() + pair[1] * x.cos()
            })
            .sum()
    }
}

/// Fitted state of the additive model. Everything internal is in scaled units:
/// time runs 0..=1 across the history and prices are divided by `y_scale`.
#[derive(Debug, Clone)]
pub struct FittedModel {
    history: Vec<NaiveDate>,
    start: NaiveDate,
    span_days: f64,
    y_scale: f64,
    intercept: f64,
    slope: f64,
    changepoints: Vec<f64>,
    deltas: Vec<f64>,
    weekly: Option<SeasonalTerm>,
    yearly: Option<SeasonalTerm>,
    sigma: f64,
    z: f64,
}

impl FittedModel {
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn n_changepoints(&self) -> usize {
        self.changepoints.len()
    }

    pub fn has_weekly(&self) -> bool {
        self.weekly.is_some()
    }

    pub fn has_yearly(&self) -> bool {
        self.yearly.is_some()
    }

    /// Residual standard deviation in price units.
    pub fn residual_sigma(&self) -> f64 {
        self.sigma * self.y_scale
    }

    fn scaled_t(&self, ds: NaiveDate) -> f64 {
        (ds - self.start).num_days() as f64 / self.span_days
    }

    fn trend_at(&self, t: f64) -> f64 {
        let bends: f64 = self
            .changepoints
            .iter()
            .zip(&self.deltas)
            .map(|(s, delta)| delta * (t - s).max(0.0))
            .sum();
        self.intercept + self.slope * t + bends
    }

    /// Variance of the trend beyond the history, assuming future slope changes
    /// arrive at the historical changepoint rate with the historical mean size.
    fn trend_variance(&self, t: f64) -> f64 {
        if t <= 1.0 || self.deltas.is_empty() {
            return 0.0;
        }
        let mean_abs_delta =
            self.deltas.iter().map(|d| d.abs()).sum::<f64>() / self.deltas.len() as f64;
        let rate = self.changepoints.len() as f64;
        rate * 2.0 * mean_abs_delta.powi(2) * (t - 1.0).powi(3) / 3.0
    }

    fn row(&self, ds: NaiveDate) -> ForecastRow {
        let t = self.scaled_t(ds);
        let day = days_since_epoch(ds) as f64;
        let trend = self.trend_at(t);
        let weekly = self.weekly.as_ref().map_or(0.0, |s| s.value(day));
        let yearly = self.yearly.as_ref().map_or(0.0, |s| s.value(day));
        let additive_terms = weekly + yearly;
        let yhat = trend + additive_terms;

        let var_trend = self.trend_variance(t);
        let trend_half = self.z * var_trend.sqrt();
        let yhat_half = self.z * (self.sigma.powi(2) + var_trend).sqrt();

        let s = self.y_scale;
        ForecastRow {
            ds,
            trend: trend * s,
            trend_lower: (trend - trend_half) * s,
            trend_upper: (trend + trend_half) * s,
            yhat_lower: (yhat - yhat_half) * s,
            yhat_upper: (yhat + yhat_half) * s,
            additive_terms: additive_terms * s,
            weekly: weekly * s,
            yearly: yearly * s,
            yhat: yhat * s,
        }
    }

    fn profiles(&self) -> SeasonalProfiles {
        let sample = |term: &SeasonalTerm, first_day: f64, len: usize| {
            (0..len)
                .map(|i| term.value(first_day + i as f64) * self.y_scale)
                .collect::<Vec<_>>()
        };
        SeasonalProfiles {
            weekly: self
                .weekly
                .as_ref()
                .map(|w| sample(w, FIRST_MONDAY_EPOCH_DAY, 7)),
            yearly: self
                .yearly
                .as_ref()
                .map(|y| sample(y, PROFILE_YEAR_EPOCH_DAY, 365)),
        }
    }
}

/// Piecewise-linear trend plus Fourier seasonalities, fitted by penalized
/// least squares. Slope changes are allowed at evenly spaced history rows and
/// shrunk toward zero by `changepoint_prior_scale`.
#[derive(Debug, Clone)]
pub struct AdditiveForecaster {
    config: ForecastConfig,
}

impl Default for AdditiveForecaster {
    fn default() -> Self {
        Self::with_config(FORECAST)
    }
}

impl AdditiveForecaster {
    pub fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Indices of history rows that host a changepoint.
    fn changepoint_indices(&self, n_rows: usize) -> Vec<usize> {
        let hist_size = (n_rows as f64 * self.config.changepoint_range).floor() as usize;
        let n_cp = self
            .config
            .n_changepoints
            .min(hist_size.saturating_sub(1));
        if n_cp == 0 {
            return Vec::new();
        }
        let step = (hist_size - 1) as f64 / n_cp as f64;
        (1..=n_cp).map(|j| (j as f64 * step).round() as usize).collect()
    }

    fn enabled<'a>(
        &self,
        season: &'a SeasonalityConfig,
        span_days: i64,
    ) -> Option<&'a SeasonalityConfig> {
        (span_days >= season.min_span_days && season.fourier_order > 0).then_some(season)
    }
}

impl Forecaster for AdditiveForecaster {
    type Model = FittedModel;

    fn fit(&self, frame: &TrainingFrame) -> Result<FittedModel, ForecastError> {
        let mut rows = frame.rows.clone();
        if rows.len() < MIN_HISTORY_ROWS {
            return Err(ForecastError::InsufficientData {
                rows: rows.len(),
                required: MIN_HISTORY_ROWS,
            });
        }
        if let Some(bad) = rows.iter().find(|r| !r.y.is_finite()) {
            return Err(ForecastError::NonFiniteValue(bad.ds));
        }
        let width = self.config.interval_width;
        if !(width > 0.0 && width < 1.0) {
            return Err(ForecastError::InvalidIntervalWidth(width));
        }
        rows.sort_by_key(|r| r.ds);

        let start = rows[0].ds;
        let span = (rows[rows.len() - 1].ds - start).num_days();
        if span <= 0 {
            return Err(ForecastError::ZeroSpan(start));
        }
        let span_days = span as f64;

        let y_scale = match rows.iter().map(|r| r.y.abs()).fold(0.0, f64::max) {
            m if m > 0.0 => m,
            _ => 1.0,
        };
        let t: Vec<f64> = rows
            .iter()
            .map(|r| (r.ds - start).num_days() as f64 / span_days)
            .collect();
        let y: Vec<f64> = rows.iter().map(|r| r.y / y_scale).collect();
        let changepoints: Vec<f64> = self
            .changepoint_indices(rows.len())
            .into_iter()
            .map(|i| t[i])
            .collect();

        let weekly_cfg = self.enabled(&self.config.weekly, span);
        let yearly_cfg = self.enabled(&self.config.yearly, span);
        let weekly_len = weekly_cfg.map_or(0, |c| 2 * c.fourier_order);
        let yearly_len = yearly_cfg.map_or(0, |c| 2 * c.fourier_order);

        let n_cp = changepoints.len();
        let p = 2 + n_cp + weekly_len + yearly_len;

        let features = |i: usize, out: &mut Vec<f64>| {
            out.clear();
            out.push(1.0);
            out.push(t[i]);
            out.extend(changepoints.iter().map(|s| (t[i] - s).max(0.0)));
            let day = days_since_epoch(rows[i].ds) as f64;
            if let Some(c) = weekly_cfg {
                push_fourier_features(day, c.period_days, c.fourier_order, out);
            }
            if let Some(c) = yearly_cfg {
                push_fourier_features(day, c.period_days, c.fourier_order, out);
            }
        };

        let mut x_data = Vec::with_capacity(rows.len() * p);
        let mut x = Vec::with_capacity(p);
        for i in 0..rows.len() {
            features(i, &mut x);
            x_data.extend_from_slice(&x);
        }
        let design = DMatrix::from_row_slice(rows.len(), p, &x_data);
        let target = DVector::from_column_slice(&y);

        let coefficients = crate::trace_time!("Additive fit", 50_000, {
            let mut xtx = design.transpose() * &design;
            let xty = design.transpose() * &target;

            // Ridge priors: changepoint deltas first, then all Fourier betas
            let delta_penalty = 1.0 / self.config.changepoint_prior_scale;
            let season_penalty = 1.0 / self.config.seasonality_prior_scale;
            for a in 2..p {
                xtx[(a, a)] += if a < 2 + n_cp {
                    delta_penalty
                } else {
                    season_penalty
                };
            }

            xtx.cholesky().map(|c| c.solve(&xty))
        })
        .ok_or(ForecastError::Singular)?;

        let residuals: Vec<f64> = (&target - &design * &coefficients).iter().copied().collect();
        let beta = coefficients.as_slice();
        let (_, sigma) = mean_and_stddev(&residuals);

        let z = Normal::new(0.0, 1.0)
            .map_err(|_| ForecastError::InvalidIntervalWidth(width))?
            .inverse_cdf(0.5 + width / 2.0);

        let season_start = 2 + n_cp;
        let model = FittedModel {
            history: rows.iter().map(|r| r.ds).collect(),
            start,
            span_days,
            y_scale,
            intercept: beta[0],
            slope: beta[1],
            deltas: beta[2..season_start].to_vec(),
            changepoints,
            weekly: weekly_cfg.map(|c| SeasonalTerm {
                period_days: c.period_days,
                betas: beta[season_start..season_start + weekly_len].to_vec(),
            }),
            yearly: yearly_cfg.map(|c| SeasonalTerm {
                period_days: c.period_days,
                betas: beta[season_start + weekly_len..p].to_vec(),
            }),
            sigma,
            z,
        };

        if DF.log_fit_summary {
            log::info!(
                "Fitted {} rows over {} days: {} changepoints, weekly={}, yearly={}, sigma={:.4}",
                model.history_len(),
                span,
                model.n_changepoints(),
                model.has_weekly(),
                model.has_yearly(),
                model.residual_sigma()
            );
        }
        Ok(model)
    }

    fn predict(&self, model: &FittedModel, periods: usize) -> Result<ForecastResult, ForecastError> {
        let last = *model
            .history
            .last()
            .ok_or(ForecastError::InsufficientData {
                rows: 0,
                required: MIN_HISTORY_ROWS,
            })?;

        let future = (1..=periods as u64)
            .map(|i| {
                last.checked_add_days(Days::new(i))
                    .ok_or(ForecastError::DateOutOfRange)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = model
            .history
            .iter()
            .copied()
            .chain(future)
            .map(|ds| model.row(ds))
            .collect();

        Ok(ForecastResult {
            rows,
            history_len: model.history_len(),
            profiles: model.profiles(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::HorizonYears, models::TrainingRow};
    use chrono::{Datelike, Weekday};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn frame(start: NaiveDate, len: usize, f: impl Fn(usize, NaiveDate) -> f64) -> TrainingFrame {
        TrainingFrame {
            rows: (0..len)
                .map(|i| {
                    let ds = start + chrono::Duration::days(i as i64);
                    TrainingRow { ds, y: f(i, ds) }
                })
                .collect(),
        }
    }

    fn width(row: &ForecastRow) -> f64 {
        row.yhat_upper - row.yhat_lower
    }

    #[test]
    fn future_rows_follow_the_horizon_in_years() {
        let history = frame(ymd(2021, 3, 1), 60, |i, _| 10.0 + 0.1 * i as f64);
        let forecaster = AdditiveForecaster::default();
        let model = forecaster.fit(&history).unwrap();
        let last = history.rows.last().unwrap().ds;

        for years in 1..=4 {
            let periods = HorizonYears::new(years).periods();
            let result = forecaster.predict(&model, periods).unwrap();

            assert_eq!(result.history_len, 60);
            assert_eq!(result.future().len(), years as usize * 365);
            assert_eq!(result.last_history_date(), Some(last));
            assert_eq!(result.future()[0].ds, last + chrono::Duration::days(1));
            assert!(result.future().windows(2).all(|w| (w[1].ds - w[0].ds).num_days() == 1));
        }
    }

    #[test]
    fn history_rows_mirror_the_training_dates() {
        let history = frame(ymd(2020, 1, 1), 45, |i, _| 5.0 + (i as f64 * 0.3).sin());
        let forecaster = AdditiveForecaster::default();
        let result = forecaster
            .predict(&forecaster.fit(&history).unwrap(), 10)
            .unwrap();

        let dates: Vec<_> = result.history().iter().map(|r| r.ds).collect();
        let expected: Vec<_> = history.rows.iter().map(|r| r.ds).collect();
        assert_eq!(dates, expected);
        assert!(
            result
                .history()
                .iter()
                .all(|r| r.trend_lower == r.trend && r.trend_upper == r.trend)
        );
    }

    #[test]
    fn linear_history_is_extrapolated_linearly() {
        let history = frame(ymd(2019, 6, 1), 400, |i, _| 100.0 + 2.0 * i as f64);
        let forecaster = AdditiveForecaster::default();
        let model = forecaster.fit(&history).unwrap();
        let result = forecaster.predict(&model, 30).unwrap();

        for (i, row) in result.rows.iter().enumerate() {
            let expected = 100.0 + 2.0 * i as f64;
            assert!((row.yhat - expected).abs() < 1e-2, "{} vs {}", row.yhat, expected);
        }
        assert!(model.residual_sigma() < 1e-3);
    }

    #[test]
    fn constant_history_solves_to_a_flat_forecast() {
        let history = frame(ymd(2022, 2, 1), 120, |_, _| 42.0);
        let forecaster = AdditiveForecaster::default();
        let model = forecaster.fit(&history).unwrap();
        assert!(model.has_weekly());

        assert!((model.intercept - 1.0).abs() < 1e-9);
        assert!(model.slope.abs() < 1e-9);
        assert!(model.deltas.iter().all(|d| d.abs() < 1e-9));

        let result = forecaster.predict(&model, 60).unwrap();
        assert!(result.rows.iter().all(|r| (r.yhat - 42.0).abs() < 1e-6));
        assert!(model.residual_sigma() < 1e-9);
    }

    #[test]
    fn too_little_history_is_rejected() {
        let forecaster = AdditiveForecaster::default();

        let empty = TrainingFrame::default();
        assert_eq!(
            forecaster.fit(&empty).unwrap_err(),
            ForecastError::InsufficientData { rows: 0, required: 2 }
        );

        let single = frame(ymd(2022, 1, 1), 1, |_, _| 1.0);
        assert!(matches!(
            forecaster.fit(&single),
            Err(ForecastError::InsufficientData { rows: 1, .. })
        ));
    }

    #[test]
    fn degenerate_histories_are_rejected() {
        let forecaster = AdditiveForecaster::default();
        let day = ymd(2022, 1, 1);
        let same_day = TrainingFrame {
            rows: vec![TrainingRow { ds: day, y: 1.0 }, TrainingRow { ds: day, y: 2.0 }],
        };
        assert_eq!(forecaster.fit(&same_day).unwrap_err(), ForecastError::ZeroSpan(day));

        let with_nan = frame(day, 10, |i, _| if i == 4 { f64::NAN } else { 1.0 });
        assert_eq!(
            forecaster.fit(&with_nan).unwrap_err(),
            ForecastError::NonFiniteValue(day + chrono::Duration::days(4))
        );
    }

    #[test]
    fn bounds_bracket_the_point_forecast() {
        let history = frame(ymd(2017, 1, 1), 900, |i, _| {
            let x = i as f64;
            50.0 + 0.1 * x + 3.0 * (x / 9.0).sin() + 6.0 * (2.0 * PI * x / 365.25).cos()
        });
        let forecaster = AdditiveForecaster::default();
        let model = forecaster.fit(&history).unwrap();
        let result = forecaster.predict(&model, 365).unwrap();

        assert!(model.has_weekly() && model.has_yearly());
        for row in &result.rows {
            assert!(row.yhat_lower <= row.yhat && row.yhat <= row.yhat_upper);
            assert!(row.trend_lower <= row.trend && row.trend <= row.trend_upper);
            assert!((row.additive_terms - (row.weekly + row.yearly)).abs() < 1e-9);
            assert!((row.yhat - (row.trend + row.additive_terms)).abs() < 1e-9);
        }
        assert_eq!(result.profiles.weekly.as_ref().map(Vec::len), Some(7));
        assert_eq!(result.profiles.yearly.as_ref().map(Vec::len), Some(365));
    }

    #[test]
    fn uncertainty_grows_with_distance() {
        let history = frame(ymd(2020, 1, 1), 400, |i, _| {
            let x = i as f64;
            let base = if i < 200 { 100.0 + x } else { 300.0 - 0.5 * (x - 200.0) };
            base + 0.5 * (x * 1.3).sin()
        });
        let forecaster = AdditiveForecaster::default();
        let result = forecaster
            .predict(&forecaster.fit(&history).unwrap(), 365)
            .unwrap();

        let last_hist = result.history().last().unwrap();
        let first_future = result.future().first().unwrap();
        let last_future = result.future().last().unwrap();

        assert!(width(first_future) >= width(last_hist));
        assert!(width(last_future) > width(first_future));
        assert!(last_future.trend_upper > last_future.trend_lower);
    }

    #[test]
    fn weekend_pattern_shows_in_weekly_profile() {
        let history = frame(ymd(2023, 1, 2), 140, |_, ds| match ds.weekday() {
            Weekday::Sat | Weekday::Sun => 110.0,
            _ => 100.0,
        });
        let forecaster = AdditiveForecaster::default();
        let model = forecaster.fit(&history).unwrap();
        let profiles = forecaster.predict(&model, 7).unwrap().profiles;

        assert!(!model.has_yearly());
        let weekly = profiles.weekly.unwrap();
        // Monday first: index 5 is Saturday, 2 is Wednesday.
        assert!(weekly[5] - weekly[2] > 7.0);
        assert!(weekly[6] - weekly[0] > 7.0);
        assert!(profiles.yearly.is_none());
    }

    #[test]
    fn short_history_disables_seasonality() {
        let history = frame(ymd(2024, 2, 1), 10, |i, _| 3.0 + i as f64);
        let model = AdditiveForecaster::default().fit(&history).unwrap();
        assert!(!model.has_weekly());
        assert!(!model.has_yearly());
        assert!(model.n_changepoints() <= 7);
    }

    #[test]
    fn changepoints_stay_in_the_leading_share_of_history() {
        let forecaster = AdditiveForecaster::default();
        let idx = forecaster.changepoint_indices(1000);
        assert_eq!(idx.len(), 25);
        assert!(idx.iter().all(|&i| i > 0 && i < 800));
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
        assert!(forecaster.changepoint_indices(2).is_empty());
    }
}
