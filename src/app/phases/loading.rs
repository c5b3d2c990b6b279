use std::time::Duration;

use eframe::egui::Context;

use crate::app::{
    App,
    phases::PhaseView,
    state::{AppState, FailedState, LoadingState, ReadyState},
};
use crate::ui::render_loading;

impl PhaseView for LoadingState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        if let Some(job) = app.engine.poll() {
            return match job.result {
                Ok(run) => AppState::Ready(ReadyState {
                    run,
                    duration_ms: job.duration_ms,
                }),
                Err(chain) => AppState::Failed(FailedState {
                    key: self.key,
                    chain,
                }),
            };
        }
        if !app.engine.is_busy() {
            return AppState::Failed(FailedState {
                key: self.key,
                chain: vec!["Pipeline worker has stopped".to_string()],
            });
        }
        render_loading(ctx, &self.key, self.started);
        ctx.request_repaint_after(Duration::from_millis(100));
        AppState::Loading(self.clone())
    }
}
