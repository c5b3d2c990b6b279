mod core;
mod messages;
mod pipeline;
mod worker;

pub use core::DashboardEngine;
pub use pipeline::{DashboardInputs, DashboardRun, run_pipeline};

pub(crate) use messages::{JobRequest, JobResult};
