use {
    crate::{
        config::{PLOT_CONFIG, PriceLike},
        models::{ForecastResult, ForecastRow, PriceSeries},
        ui::UI_TEXT,
        utils::days_since_epoch,
    },
    chrono::NaiveDate,
    eframe::egui::Stroke,
    egui_plot::{Line, LineStyle, PlotPoints, PlotUi, Points, Polygon, VLine},
};

#[inline]
pub(crate) fn plot_x(date: NaiveDate) -> f64 {
    days_since_epoch(date) as f64
}

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub series: &'a PriceSeries,
    pub forecast: &'a ForecastResult,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. CONFIDENCE BAND (yhat_lower .. yhat_upper)
// ============================================================================
pub struct ConfidenceBandLayer;

impl ConfidenceBandLayer {
    fn quad(a: &ForecastRow, b: &ForecastRow) -> PlotPoints<'static> {
        let (xa, xb) = (plot_x(a.ds), plot_x(b.ds));
        PlotPoints::new(vec![
            [xa, a.yhat_lower],
            [xb, b.yhat_lower],
            [xb, b.yhat_upper],
            [xa, a.yhat_upper],
        ])
    }
}

impl PlotLayer for ConfidenceBandLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let rows = &ctx.forecast.rows;
        if rows.len() < 2 {
            return;
        }
        // Polygons are filled as convex shapes, so the band is drawn as a
        // strip of quads over a thinned set of rows.
        let step = rows.len().div_ceil(PLOT_CONFIG.max_band_segments).max(1);
        let mut anchors: Vec<&ForecastRow> = rows.iter().step_by(step).collect();
        if let Some(last) = rows.last() {
            if anchors.last().map(|r| r.ds) != Some(last.ds) {
                anchors.push(last);
            }
        }

        for (i, pair) in anchors.windows(2).enumerate() {
            let name = if i == 0 { UI_TEXT.legend_band.as_str() } else { "" };
            plot_ui.polygon(
                Polygon::new(name, Self::quad(pair[0], pair[1]))
                    .fill_color(PLOT_CONFIG.color_band)
                    .stroke(Stroke::NONE),
            );
        }
    }
}

// ============================================================================
// 2. FORECAST LINE (yhat)
// ============================================================================
pub struct ForecastLineLayer;

impl PlotLayer for ForecastLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: PlotPoints = ctx
            .forecast
            .rows
            .iter()
            .map(|r| [plot_x(r.ds), r.yhat])
            .collect();
        plot_ui.line(
            Line::new(UI_TEXT.legend_yhat.as_str(), points)
                .color(PLOT_CONFIG.color_yhat)
                .width(PLOT_CONFIG.line_width),
        );
    }
}

// ============================================================================
// 3. ACTUAL CLOSES (scatter)
// ============================================================================
pub struct ActualPointsLayer;

impl PlotLayer for ActualPointsLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: PlotPoints = ctx
            .series
            .dates
            .iter()
            .zip(&ctx.series.close_prices)
            .map(|(&d, c)| [plot_x(d), c.value()])
            .collect();
        plot_ui.points(
            Points::new(UI_TEXT.legend_actual.as_str(), points)
                .color(PLOT_CONFIG.color_actual)
                .radius(PLOT_CONFIG.actual_point_radius),
        );
    }
}

// ============================================================================
// 4. HISTORY END MARKER
// ============================================================================
pub struct HistoryEndLayer;

impl PlotLayer for HistoryEndLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(last) = ctx.forecast.last_history_date() {
            plot_ui.vline(
                VLine::new("", plot_x(last))
                    .color(PLOT_CONFIG.color_history_end)
                    .style(LineStyle::dashed_loose()),
            );
        }
    }
}

// ============================================================================
// 5. RAW OPEN / CLOSE LINES
// ============================================================================
pub struct OpenCloseLayer;

impl OpenCloseLayer {
    fn line<P: PriceLike>(series: &PriceSeries, values: &[P]) -> PlotPoints<'static> {
        series
            .dates
            .iter()
            .zip(values)
            .map(|(&d, v)| [plot_x(d), v.value()])
            .collect()
    }
}

impl PlotLayer for OpenCloseLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let series = ctx.series;
        plot_ui.line(
            Line::new(UI_TEXT.legend_open.as_str(), Self::line(series, &series.open_prices))
                .color(PLOT_CONFIG.color_open)
                .width(PLOT_CONFIG.line_width),
        );
        plot_ui.line(
            Line::new(UI_TEXT.legend_close.as_str(), Self::line(series, &series.close_prices))
                .color(PLOT_CONFIG.color_close)
                .width(PLOT_CONFIG.line_width),
        );
    }
}
