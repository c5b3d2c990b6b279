use {
    crate::{
        models::{ForecastRow, PriceSeries},
        ui::UI_CONFIG,
        utils::format_date,
    },
    eframe::egui::{Align, Layout, Ui},
    egui_extras::{Column, TableBuilder},
    std::ops::Range,
};

const PRICE_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];
const FORECAST_COLUMNS: [&str; 10] = [
    "ds",
    "trend",
    "yhat_lower",
    "yhat_upper",
    "trend_lower",
    "trend_upper",
    "additive_terms",
    "weekly",
    "yearly",
    "yhat",
];

/// Fixed-size preview of a slice of the price table.
pub(crate) fn render_price_preview(ui: &mut Ui, id: &str, series: &PriceSeries, rows: Range<usize>) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(Layout::right_to_left(Align::Center))
            .columns(Column::auto().at_least(90.0), PRICE_COLUMNS.len())
            .header(UI_CONFIG.table_row_height, |mut header| {
                for name in PRICE_COLUMNS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for idx in rows {
                    let record = series.record(idx);
                    body.row(UI_CONFIG.table_row_height, |mut row| {
                        row.col(|ui| {
                            ui.label(format_date(record.date));
                        });
                        for cell in [
                            record.open.to_string(),
                            record.high.to_string(),
                            record.low.to_string(),
                            record.close.to_string(),
                            record.volume.to_string(),
                        ] {
                            row.col(|ui| {
                                ui.monospace(cell);
                            });
                        }
                    });
                }
            });
    });
}

fn forecast_cells(row: &ForecastRow) -> [f64; 9] {
    [
        row.trend,
        row.yhat_lower,
        row.yhat_upper,
        row.trend_lower,
        row.trend_upper,
        row.additive_terms,
        row.weekly,
        row.yearly,
        row.yhat,
    ]
}

/// The full forecast, history and future, in a virtualized scroll table.
pub(crate) fn render_forecast_table(ui: &mut Ui, rows: &[ForecastRow]) {
    ui.push_id("forecast_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(UI_CONFIG.forecast_table_height)
            .cell_layout(Layout::right_to_left(Align::Center))
            .columns(Column::auto().at_least(80.0), FORECAST_COLUMNS.len())
            .header(UI_CONFIG.table_row_height, |mut header| {
                for name in FORECAST_COLUMNS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(UI_CONFIG.table_row_height, rows.len(), |mut table_row| {
                    let row = &rows[table_row.index()];
                    table_row.col(|ui| {
                        ui.label(format_date(row.ds));
                    });
                    for value in forecast_cells(row) {
                        table_row.col(|ui| {
                            ui.monospace(format!("{:.4}", value));
                        });
                    }
                });
            });
    });
}
