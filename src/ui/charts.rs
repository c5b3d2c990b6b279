use {
    crate::{
        config::PLOT_CONFIG,
        models::{ForecastResult, PriceSeries},
        ui::{
            ActualPointsLayer, ConfidenceBandLayer, ForecastLineLayer, HistoryEndLayer,
            LayerContext, OpenCloseLayer, PlotLayer, UI_TEXT, UiStyleExt, plot_x,
        },
        utils::{date_from_epoch_days, format_date},
    },
    chrono::NaiveDate,
    eframe::egui::Ui,
    egui_plot::{GridMark, Legend, Line, LineStyle, Plot, PlotPoints},
    std::ops::RangeInclusive,
};

fn date_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    date_from_epoch_days(mark.value)
        .map(format_date)
        .unwrap_or_default()
}

fn weekday_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let idx = mark.value.round();
    if (mark.value - idx).abs() > 1e-6 || !(0.0..7.0).contains(&idx) {
        return String::new();
    }
    UI_TEXT.weekday_names[idx as usize].to_string()
}

fn day_of_year_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if !(0.0..365.0).contains(&mark.value) {
        return String::new();
    }
    // 2017 is not a leap year, matching the 365-day profile.
    NaiveDate::from_yo_opt(2017, mark.value.round() as u32 + 1)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default()
}

fn dated_plot(id: &str, height: f32) -> Plot<'static> {
    Plot::new(id.to_string())
        .height(height)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(date_axis)
        .label_formatter(|name, value| {
            let date = date_from_epoch_days(value.x)
                .map(format_date)
                .unwrap_or_default();
            if name.is_empty() {
                format!("{}\n{:.2}", date, value.y)
            } else {
                format!("{}\n{}: {:.2}", date, name, value.y)
            }
        })
}

fn render_layers(ui: &mut Ui, plot: Plot, ctx: &LayerContext, layers: Vec<Box<dyn PlotLayer>>) {
    plot.show(ui, |plot_ui| {
        for layer in &layers {
            layer.render(plot_ui, ctx);
        }
    });
}

/// Actual closes, forecast line and its band; drag and scroll-zoom replace a range slider.
pub(crate) fn render_forecast_chart(ui: &mut Ui, series: &PriceSeries, forecast: &ForecastResult) {
    let ctx = LayerContext { series, forecast };
    let layers: Vec<Box<dyn PlotLayer>> = vec![
        Box::new(ConfidenceBandLayer),
        Box::new(HistoryEndLayer),
        Box::new(ActualPointsLayer),
        Box::new(ForecastLineLayer),
    ];
    render_layers(
        ui,
        dated_plot("forecast_plot", PLOT_CONFIG.main_plot_height).y_axis_label(UI_TEXT.plot_y_axis.as_str()),
        &ctx,
        layers,
    );
}

pub(crate) fn render_raw_chart(ui: &mut Ui, series: &PriceSeries, forecast: &ForecastResult) {
    let ctx = LayerContext { series, forecast };
    render_layers(
        ui,
        dated_plot("raw_plot", PLOT_CONFIG.main_plot_height).y_axis_label(UI_TEXT.plot_y_axis.as_str()),
        &ctx,
        vec![Box::new(OpenCloseLayer)],
    );
}

/// Trend over the whole forecast, then one period of each fitted seasonality.
pub(crate) fn render_components(ui: &mut Ui, forecast: &ForecastResult) {
    ui.label_subheader(&UI_TEXT.legend_trend);
    dated_plot("trend_component", PLOT_CONFIG.component_plot_height).show(ui, |plot_ui| {
        let trend: PlotPoints = forecast.rows.iter().map(|r| [plot_x(r.ds), r.trend]).collect();
        plot_ui.line(
            Line::new(UI_TEXT.legend_trend.as_str(), trend)
                .color(PLOT_CONFIG.color_component)
                .width(PLOT_CONFIG.line_width),
        );
        for bound in [
            forecast.future().iter().map(|r| [plot_x(r.ds), r.trend_lower]).collect::<PlotPoints>(),
            forecast.future().iter().map(|r| [plot_x(r.ds), r.trend_upper]).collect::<PlotPoints>(),
        ] {
            plot_ui.line(
                Line::new("", bound)
                    .color(PLOT_CONFIG.color_component)
                    .style(LineStyle::dashed_loose()),
            );
        }
    });

    if let Some(weekly) = &forecast.profiles.weekly {
        ui.label_subheader(&UI_TEXT.legend_weekly);
        render_profile(ui, "weekly_component", &UI_TEXT.legend_weekly, weekly, weekday_axis);
    }
    if let Some(yearly) = &forecast.profiles.yearly {
        ui.label_subheader(&UI_TEXT.legend_yearly);
        render_profile(ui, "yearly_component", &UI_TEXT.legend_yearly, yearly, day_of_year_axis);
    }
}

fn render_profile(
    ui: &mut Ui,
    id: &str,
    name: &str,
    values: &[f64],
    x_axis: fn(GridMark, &RangeInclusive<f64>) -> String,
) {
    Plot::new(id.to_string())
        .height(PLOT_CONFIG.component_plot_height)
        .allow_scroll(false)
        .x_axis_formatter(x_axis)
        .show(ui, |plot_ui| {
            let points: PlotPoints = values
                .iter()
                .enumerate()
                .map(|(i, v)| [i as f64, *v])
                .collect();
            plot_ui.line(
                Line::new(name.to_string(), points)
                    .color(PLOT_CONFIG.color_component)
                    .width(PLOT_CONFIG.line_width),
            );
        });
}
