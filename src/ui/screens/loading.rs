use {
    crate::{
        config::PLOT_CONFIG,
        domain::LoadKey,
        ui::{UI_CONFIG, UI_TEXT},
        utils::{AppInstant, format_duration},
    },
    eframe::egui::{CentralPanel, Context, RichText},
};

pub(crate) fn render_loading(ctx: &Context, key: &LoadKey, started: AppInstant) {
    CentralPanel::default()
        .frame(UI_CONFIG.central_panel_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading(
                    RichText::new(&UI_TEXT.ls_title)
                        .size(24.0)
                        .strong()
                        .color(PLOT_CONFIG.color_warning),
                );
                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!(
                        "{} {} {}",
                        UI_TEXT.ls_fetching, key, UI_TEXT.ls_fitting
                    ))
                    .italics()
                    .color(PLOT_CONFIG.color_text_neutral),
                );
                ui.add_space(20.0);
                ui.spinner();
                ui.add_space(10.0);
                ui.label(
                    RichText::new(format_duration(started.elapsed().as_millis() as i64))
                        .small()
                        .color(PLOT_CONFIG.color_text_subdued),
                );
            });
        });
}
