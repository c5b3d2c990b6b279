//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- FORECAST CHART ---
    pub color_actual: Color32,
    pub color_yhat: Color32,
    /// Shaded yhat_lower..yhat_upper region
    pub color_band: Color32,
    pub actual_point_radius: f32,
    pub line_width: f32,
    /// Vertical marker at the last historical date
    pub color_history_end: Color32,
    /// Upper bound on quads used to shade the band
    pub max_band_segments: usize,

    // --- RAW CHART ---
    pub color_open: Color32,
    pub color_close: Color32,

    // --- COMPONENTS ---
    pub color_component: Color32,
    pub component_plot_height: f32,

    pub main_plot_height: f32,

    // --- SEMANTIC COLORS ---
    pub color_warning: Color32,
    pub color_loss: Color32,
    pub color_profit: Color32,
    pub color_text_neutral: Color32,
    pub color_text_subdued: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    color_actual: Color32::from_rgb(220, 220, 220),
    color_yhat: Color32::from_rgb(0, 114, 178),
    color_band: Color32::from_rgba_premultiplied(0, 60, 95, 90),
    actual_point_radius: 1.5,
    line_width: 1.5,
    color_history_end: Color32::from_gray(90),
    max_band_segments: 600,

    color_open: Color32::from_rgb(99, 110, 250),
    color_close: Color32::from_rgb(239, 85, 59),

    color_component: Color32::from_rgb(0, 114, 178),
    component_plot_height: 180.0,

    main_plot_height: 420.0,

    color_warning: Color32::from_rgb(255, 190, 60),
    color_loss: Color32::from_rgb(230, 80, 80),
    color_profit: Color32::from_rgb(80, 200, 120),
    color_text_neutral: Color32::WHITE,
    color_text_subdued: Color32::from_gray(140),
};
