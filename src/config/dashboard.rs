//! Dashboard inputs and cache policy

use std::time::Duration;

pub struct DashboardConfig {
    /// Default value of the start-date picker (year, month, day)
    pub default_start: (i32, u32, u32),
    /// Inclusive slider bounds for the forecast horizon
    pub horizon_years: (u32, u32),
    /// Periods per horizon year handed to the forecaster
    pub days_per_year: usize,
    /// How long an encoded CSV export stays valid
    pub csv_ttl: Duration,
    /// Rows shown in the head and tail previews
    pub preview_rows: usize,
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    default_start: (2018, 1, 1),
    horizon_years: (1, 4),
    days_per_year: 365,
    csv_ttl: Duration::from_secs(24 * 60 * 60),
    preview_rows: 5,
};
