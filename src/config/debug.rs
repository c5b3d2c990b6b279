//! Debugging feature flags.

pub struct LogFlags {
    /// Cache hits / misses in the data loader and CSV exporter.
    pub log_cache: bool,

    /// Every kline page requested from the market-data provider.
    pub log_fetch_pages: bool,

    /// Changepoints, enabled seasonalities and residual sigma after each fit.
    pub log_fit_summary: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Input changes that trigger a new pipeline run.
    pub log_inputs: bool,
}

pub const DF: LogFlags = LogFlags {
    log_cache: true,
    log_inputs: true,

    log_fit_summary: false,
    log_fetch_pages: false,
    log_performance: false,
};
