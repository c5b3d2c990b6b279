use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::{AppState, FailedState}};
use crate::ui::render_failure;

impl PhaseView for FailedState {
    fn tick(&mut self, _app: &mut App, ctx: &Context) -> AppState {
        render_failure(ctx, &self.key, &self.chain);
        AppState::Failed(self.clone())
    }
}
