// src/app/state.rs

use std::{path::PathBuf, sync::Arc};

use crate::{domain::LoadKey, engine::DashboardRun, utils::AppInstant};

pub(crate) enum AppState {
    Loading(LoadingState),
    Ready(ReadyState),
    Failed(FailedState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Loading(LoadingState::new(LoadKey::new(
            Default::default(),
            Default::default(),
            Default::default(),
        )))
    }
}

#[derive(Clone)]
pub(crate) struct LoadingState {
    pub(crate) key: LoadKey,
    pub(crate) started: AppInstant,
}

impl LoadingState {
    pub(crate) fn new(key: LoadKey) -> Self {
        Self {
            key,
            started: AppInstant::now(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct ReadyState {
    pub(crate) run: Arc<DashboardRun>,
    pub(crate) duration_ms: u128,
}

#[derive(Clone)]
pub(crate) struct FailedState {
    pub(crate) key: LoadKey,
    /// Outermost message first
    pub(crate) chain: Vec<String>,
}

/// Outcome of the last download click, shown next to the button.
#[derive(Debug, Clone)]
pub(crate) enum DownloadStatus {
    Saved(PathBuf),
    Failed(String),
}
