use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::{AppState, ReadyState}};

impl PhaseView for ReadyState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.render_dashboard(ctx, self);
        AppState::Ready(self.clone())
    }
}
