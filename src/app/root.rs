use {
    eframe::{
        Frame,
        egui::{Context, Visuals},
    },
    std::{mem, path::PathBuf},
};

use crate::{
    Cli,
    app::{AppState, DownloadStatus, LoadingState, PhaseView},
    config::DF,
    data::{BinanceProvider, CsvExporter, DemoProvider, MarketDataProvider},
    engine::{DashboardEngine, DashboardInputs, DashboardRun},
    ui::{UI_CONFIG, render_controls_panel},
    utils::today_local,
};

pub struct App {
    pub(crate) inputs: DashboardInputs,
    pub(crate) engine: DashboardEngine,
    pub(crate) exporter: CsvExporter,
    pub(crate) download_dir: PathBuf,
    pub(crate) download_status: Option<DownloadStatus>,
    state: AppState,
}

impl App {
    pub(crate) fn new(_cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let provider: Box<dyn MarketDataProvider> = if args.demo {
            Box::new(DemoProvider)
        } else {
            Box::new(BinanceProvider::new())
        };
        log::info!("Market data source: {}", provider.name());

        let mut app = Self {
            inputs: DashboardInputs::default(),
            engine: DashboardEngine::new(provider),
            exporter: CsvExporter::default(),
            download_dir: args.download_dir,
            download_status: None,
            state: AppState::default(),
        };
        app.sync_inputs();
        app
    }

    /// Starts a new run whenever the controls differ from the last request.
    fn sync_inputs(&mut self) {
        let today = today_local();
        if self.engine.request(self.inputs, today) {
            self.download_status = None;
            self.state = AppState::Loading(LoadingState::new(self.inputs.load_key(today)));
        }
    }

    pub(crate) fn download_csv(&mut self, run: &DashboardRun) {
        let status = match self.exporter.save(&self.download_dir, &run.key, &run.series) {
            Ok(path) => DownloadStatus::Saved(path),
            Err(e) => {
                log::error!("CSV download failed for {}: {:#}", run.key, e);
                DownloadStatus::Failed(format!("{:#}", e))
            }
        };
        if DF.log_cache {
            log::info!("Download: {:?} ({} cached exports)", status, self.exporter.len());
        }
        self.download_status = Some(status);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        render_controls_panel(ctx, &mut self.inputs, self.engine.provider_name());
        self.sync_inputs();

        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Loading(mut s) => s.tick(self, ctx),
            AppState::Ready(mut s) => s.tick(self, ctx),
            AppState::Failed(mut s) => s.tick(self, ctx),
        };
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
}
