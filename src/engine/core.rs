use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use chrono::NaiveDate;

use crate::config::DF;
use crate::data::{DataLoader, MarketDataProvider};

use super::DashboardInputs;
use super::messages::{JobRequest, JobResult};
use super::worker;

/// UI-side handle on the pipeline worker.
pub struct DashboardEngine {
    job_tx: Sender<JobRequest>,     // UI writes to this
    result_rx: Receiver<JobResult>, // UI reads from this
    provider_name: &'static str,

    /// The most recent request; results for anything else are stale.
    requested: Option<JobRequest>,
    busy: bool,
}

impl DashboardEngine {
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();

        let loader = Arc::new(DataLoader::new(provider));
        let provider_name = loader.provider_name();
        worker::spawn_worker_thread(job_rx, result_tx, loader);

        Self {
            job_tx,
            result_rx,
            provider_name,
            requested: None,
            busy: false,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Queues a run unless the same inputs were already requested for the
    /// same day. A new local date moves the data window, so it reruns.
    /// Returns true when a job was sent.
    pub fn request(&mut self, inputs: DashboardInputs, today: NaiveDate) -> bool {
        let req = JobRequest { inputs, today };
        if self.requested == Some(req) {
            return false;
        }
        if DF.log_inputs {
            log::info!("Inputs changed: {:?} through {}", inputs, today);
        }
        self.requested = Some(req);
        self.busy = self.job_tx.send(req).is_ok();
        if !self.busy {
            log::error!("Pipeline worker has stopped; request dropped");
        }
        self.busy
    }

    /// Drains finished jobs and returns the newest one that matches the
    /// latest request.
    pub fn poll(&mut self) -> Option<JobResult> {
        let mut latest = None;
        while let Ok(result) = self.result_rx.try_recv() {
            let current = self
                .requested
                .is_some_and(|r| r.inputs == result.inputs && r.today == result.today);
            if current {
                latest = Some(result);
            } else if DF.log_inputs {
                log::info!("Discarding stale result for {:?}", result.inputs);
            }
        }
        if latest.is_some() {
            self.busy = false;
        }
        latest
    }

    #[cfg(test)]
    fn wait(&mut self, timeout: std::time::Duration) -> Option<JobResult> {
        let result = self.result_rx.recv_timeout(timeout).ok()?;
        self.busy = false;
        Some(result)
    }
}
