use std::sync::LazyLock;

pub struct UiText {
    // --- Header ---
    pub app_title: String,
    pub app_subtitle: String,
    pub app_intro: String,

    // --- Controls ---
    pub label_symbol: String,
    pub label_start_date: String,
    pub label_horizon: String,
    pub label_source: String,

    // --- Sections ---
    pub heading_raw_data: String,
    pub heading_head: String,
    pub heading_tail: String,
    pub heading_forecast_data: String,
    pub heading_forecast_prefix: String,
    pub heading_raw_chart: String,
    pub heading_components: String,
    pub label_rows: String,
    pub label_run_time: String,

    // --- Download ---
    pub btn_download: String,
    pub download_saved: String,
    pub download_failed: String,

    // --- Plot legends ---
    pub legend_actual: String,
    pub legend_yhat: String,
    pub legend_band: String,
    pub legend_open: String,
    pub legend_close: String,
    pub legend_trend: String,
    pub legend_weekly: String,
    pub legend_yearly: String,
    pub plot_y_axis: String,
    pub weekday_names: [&'static str; 7],

    // --- Loading / failure ---
    pub ls_title: String,
    pub ls_fetching: String,
    pub ls_fitting: String,
    pub fail_title: String,
    pub fail_caused_by: String,
    pub fail_hint: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Crypto Forecast".to_string(),
    app_subtitle: "Daily price forecasting".to_string(),
    app_intro: "Pick a pair, a start date and a horizon on the left. Results update as soon as \
                the inputs change."
        .to_string(),

    label_symbol: "Pair".to_string(),
    label_start_date: "Start date".to_string(),
    label_horizon: "Years to forecast".to_string(),
    label_source: "Source".to_string(),

    heading_raw_data: "Raw data".to_string(),
    heading_head: "First rows".to_string(),
    heading_tail: "Last rows".to_string(),
    heading_forecast_data: "Forecast data".to_string(),
    heading_forecast_prefix: "Forecast for".to_string(),
    heading_raw_chart: "Open and close".to_string(),
    heading_components: "Components".to_string(),
    label_rows: "Rows".to_string(),
    label_run_time: "Run time".to_string(),

    btn_download: "Download data".to_string(),
    download_saved: "Saved".to_string(),
    download_failed: "Download failed".to_string(),

    legend_actual: "Actual".to_string(),
    legend_yhat: "Forecast".to_string(),
    legend_band: "Uncertainty".to_string(),
    legend_open: "Open".to_string(),
    legend_close: "Close".to_string(),
    legend_trend: "Trend".to_string(),
    legend_weekly: "Weekly".to_string(),
    legend_yearly: "Yearly".to_string(),
    plot_y_axis: "Price".to_string(),
    weekday_names: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],

    ls_title: "Loading...".to_string(),
    ls_fetching: "Fetching daily candles for".to_string(),
    ls_fitting: "then fitting the model".to_string(),
    fail_title: "Run failed".to_string(),
    fail_caused_by: "Caused by".to_string(),
    fail_hint: "Change any input to try again.".to_string(),
});
