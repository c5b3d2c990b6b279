use {
    crate::{
        config::PLOT_CONFIG,
        domain::LoadKey,
        ui::{UI_CONFIG, UI_TEXT, UiStyleExt},
    },
    eframe::egui::{CentralPanel, Context, RichText, ScrollArea},
};

/// Error page: the outermost message first, then each cause.
pub(crate) fn render_failure(ctx: &Context, key: &LoadKey, chain: &[String]) {
    CentralPanel::default()
        .frame(UI_CONFIG.central_panel_frame())
        .show(ctx, |ui| {
            ui.add_space(20.0);
            ui.heading(
                RichText::new(&UI_TEXT.fail_title)
                    .size(22.0)
                    .strong()
                    .color(PLOT_CONFIG.color_loss),
            );
            ui.label_subdued(key.to_string());
            ui.add_space(12.0);

            ScrollArea::vertical().show(ui, |ui| {
                let mut causes = chain.iter();
                if let Some(top) = causes.next() {
                    ui.label(RichText::new(top).strong().color(PLOT_CONFIG.color_text_neutral));
                }
                for cause in causes {
                    ui.add_space(4.0);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            RichText::new(format!("{}:", UI_TEXT.fail_caused_by))
                                .color(PLOT_CONFIG.color_warning),
                        );
                        ui.label(RichText::new(cause).monospace());
                    });
                }
            });

            ui.add_space(16.0);
            ui.label_subdued(&UI_TEXT.fail_hint);
        });
}
