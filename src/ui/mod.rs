mod charts;
mod plot_layers;
mod screens;
mod styles;
mod tables;
mod ui_config;
mod ui_panels;
mod ui_render;
mod ui_text;

pub(crate) use charts::{render_components, render_forecast_chart, render_raw_chart};

pub(crate) use plot_layers::{
    ActualPointsLayer, ConfidenceBandLayer, ForecastLineLayer, HistoryEndLayer, LayerContext,
    OpenCloseLayer, PlotLayer, plot_x,
};

pub(crate) use screens::{render_failure, render_loading};

pub(crate) use styles::UiStyleExt;

pub(crate) use tables::{render_forecast_table, render_price_preview};

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_panels::render_controls_panel;
