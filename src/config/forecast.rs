/// Knobs of the additive trend + seasonality model.
#[derive(Debug, Clone)]
pub struct SeasonalityConfig {
    pub period_days: f64,
    pub fourier_order: usize,
    /// Minimum history span (days) before the component is switched on
    pub min_span_days: i64,
}

#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub n_changepoints: usize,
    /// Share of history rows that may host a changepoint
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
    /// Coverage of yhat_lower..yhat_upper
    pub interval_width: f64,
    pub yearly: SeasonalityConfig,
    pub weekly: SeasonalityConfig,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    n_changepoints: 25,
    changepoint_range: 0.8,
    changepoint_prior_scale: 0.05,
    seasonality_prior_scale: 10.0,
    interval_width: 0.8,
    yearly: SeasonalityConfig {
        period_days: 365.25,
        fourier_order: 10,
        min_span_days: 730,
    },
    weekly: SeasonalityConfig {
        period_days: 7.0,
        fourier_order: 3,
        min_span_days: 14,
    },
};
