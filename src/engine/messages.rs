use {
    crate::engine::{DashboardInputs, DashboardRun},
    chrono::NaiveDate,
    std::sync::Arc,
};

/// A request to rebuild the dashboard for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobRequest {
    pub inputs: DashboardInputs,
    /// End of the data window, frozen when the request is made
    pub today: NaiveDate,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub inputs: DashboardInputs,
    pub today: NaiveDate,
    pub duration_ms: u128,
    /// On failure, the error's context chain, outermost first
    pub result: Result<Arc<DashboardRun>, Vec<String>>,
}
