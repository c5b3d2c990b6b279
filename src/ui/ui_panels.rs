use {
    crate::{
        config::{DASHBOARD, HorizonYears, PLOT_CONFIG},
        domain::Symbol,
        engine::DashboardInputs,
        ui::{UI_CONFIG, UI_TEXT, UiStyleExt},
    },
    eframe::egui::{ComboBox, Context, RichText, SidePanel, Slider, Ui},
    egui_extras::DatePickerButton,
    strum::IntoEnumIterator,
};

/// Left panel with the three dashboard controls. Edits `inputs` in place.
pub(crate) fn render_controls_panel(ctx: &Context, inputs: &mut DashboardInputs, source: &str) {
    SidePanel::left("controls_panel")
        .frame(UI_CONFIG.side_panel_frame())
        .exact_width(UI_CONFIG.side_panel_width)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading(
                RichText::new(&UI_TEXT.app_title)
                    .strong()
                    .color(UI_CONFIG.colors.heading),
            );
            ui.label_subdued(&UI_TEXT.app_subtitle);
            ui.add_space(16.0);

            render_symbol_selector(ui, &mut inputs.symbol);
            ui.add_space(8.0);
            render_start_picker(ui, inputs);
            ui.add_space(8.0);
            render_horizon_slider(ui, &mut inputs.horizon);

            ui.add_space(16.0);
            ui.separator();
            ui.metric(&UI_TEXT.label_source, source, PLOT_CONFIG.color_text_neutral);
        });
}

fn render_symbol_selector(ui: &mut Ui, symbol: &mut Symbol) {
    ui.label_subheader(&UI_TEXT.label_symbol);
    ComboBox::from_id_salt("symbol_selector")
        .selected_text(symbol.to_string())
        .width(UI_CONFIG.side_panel_width - 40.0)
        .show_ui(ui, |ui| {
            for candidate in Symbol::iter() {
                ui.selectable_value(symbol, candidate, candidate.to_string());
            }
        });
}

fn render_start_picker(ui: &mut Ui, inputs: &mut DashboardInputs) {
    ui.label_subheader(&UI_TEXT.label_start_date);
    ui.add(DatePickerButton::new(&mut inputs.start).id_salt("start_date"));
}

fn render_horizon_slider(ui: &mut Ui, horizon: &mut HorizonYears) {
    ui.label_subheader(&UI_TEXT.label_horizon);
    let (min, max) = DASHBOARD.horizon_years;
    let mut years = horizon.value();
    ui.add(Slider::new(&mut years, min..=max).integer());
    *horizon = HorizonYears::new(years);
}
