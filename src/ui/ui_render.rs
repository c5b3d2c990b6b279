use eframe::egui::{CentralPanel, Context, RichText, ScrollArea, Ui};

use crate::app::{App, DownloadStatus, ReadyState};
use crate::config::{DASHBOARD, PLOT_CONFIG};
use crate::engine::DashboardRun;
use crate::ui::{
    UI_CONFIG, UI_TEXT, UiStyleExt, render_components, render_forecast_chart,
    render_forecast_table, render_price_preview, render_raw_chart,
};
use crate::utils::format_duration;

impl App {
    /// The results page, top to bottom in a fixed order.
    pub(crate) fn render_dashboard(&mut self, ctx: &Context, state: &ReadyState) {
        let run = &state.run;
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_intro(ui, run, state.duration_ms);
                        self.render_previews(ui, run);

                        ui.section_heading(&UI_TEXT.heading_forecast_data);
                        self.render_download(ui, run);
                        render_forecast_table(ui, &run.forecast.rows);

                        ui.section_heading(format!(
                            "{} {}",
                            UI_TEXT.heading_forecast_prefix, run.inputs.horizon
                        ));
                        render_forecast_chart(ui, &run.series, &run.forecast);

                        ui.section_heading(&UI_TEXT.heading_raw_chart);
                        render_raw_chart(ui, &run.series, &run.forecast);

                        ui.section_heading(&UI_TEXT.heading_components);
                        render_components(ui, &run.forecast);
                        ui.add_space(24.0);
                    });
            });
    }

    fn render_intro(&self, ui: &mut Ui, run: &DashboardRun, duration_ms: u128) {
        ui.heading(
            RichText::new(&UI_TEXT.app_title)
                .size(28.0)
                .strong()
                .color(UI_CONFIG.colors.heading),
        );
        ui.label(UI_TEXT.app_intro.as_str());
        ui.horizontal(|ui| {
            ui.metric(
                &UI_TEXT.label_rows,
                &run.series.len().to_string(),
                PLOT_CONFIG.color_text_neutral,
            );
            ui.add_space(12.0);
            ui.metric(
                &UI_TEXT.label_run_time,
                &format_duration(duration_ms as i64),
                PLOT_CONFIG.color_text_neutral,
            );
            ui.add_space(12.0);
            ui.label_subdued(run.key.to_string());
        });
    }

    fn render_previews(&self, ui: &mut Ui, run: &DashboardRun) {
        let n = DASHBOARD.preview_rows;
        ui.section_heading(&UI_TEXT.heading_raw_data);
        ui.label_subheader(&UI_TEXT.heading_head);
        render_price_preview(ui, "head_preview", &run.series, run.series.head(n));
        ui.add_space(8.0);
        ui.label_subheader(&UI_TEXT.heading_tail);
        render_price_preview(ui, "tail_preview", &run.series, run.series.tail(n));
    }

    fn render_download(&mut self, ui: &mut Ui, run: &DashboardRun) {
        ui.horizontal(|ui| {
            if ui.button(UI_TEXT.btn_download.as_str()).clicked() {
                self.download_csv(run);
            }
            match &self.download_status {
                Some(DownloadStatus::Saved(path)) => {
                    ui.label(
                        RichText::new(format!("{} {}", UI_TEXT.download_saved, path.display()))
                            .color(PLOT_CONFIG.color_profit),
                    );
                }
                Some(DownloadStatus::Failed(msg)) => {
                    ui.label(
                        RichText::new(format!("{}: {}", UI_TEXT.download_failed, msg))
                            .color(PLOT_CONFIG.color_loss),
                    );
                }
                None => {}
            }
        });
        ui.add_space(6.0);
    }
}
