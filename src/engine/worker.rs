use {
    crate::{
        analysis::AdditiveForecaster,
        data::DataLoader,
        engine::{JobRequest, JobResult, run_pipeline},
        utils::AppInstant,
    },
    std::{
        sync::{
            Arc,
            mpsc::{Receiver, Sender},
        },
        thread,
    },
    tokio::runtime::Builder,
};

/// Spawns the background thread that owns the async runtime and runs one
/// pipeline at a time. Requests queued behind a running job collapse into
/// the newest one.
pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>, loader: Arc<DataLoader>) {
    thread::spawn(move || {
        let rt = match Builder::new_multi_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create worker runtime: {}", e);
                while let Ok(req) = rx.recv() {
                    let _ = tx.send(JobResult {
                        inputs: req.inputs,
                        today: req.today,
                        duration_ms: 0,
                        result: Err(vec![format!("Worker runtime unavailable: {}", e)]),
                    });
                }
                return;
            }
        };
        let forecaster = AdditiveForecaster::default();

        while let Ok(mut req) = rx.recv() {
            while let Ok(newer) = rx.try_recv() {
                req = newer;
            }
            let response = rt.block_on(process_request(&loader, &forecaster, req));
            if tx.send(response).is_err() {
                break;
            }
        }
    });
}

async fn process_request(
    loader: &DataLoader,
    forecaster: &AdditiveForecaster,
    req: JobRequest,
) -> JobResult {
    let label = format!("{} / {}", req.inputs.symbol, req.inputs.horizon);
    let start = AppInstant::now();

    let result = crate::trace_time!(&format!("Pipeline [{}]", label), 250_000, {
        run_pipeline(loader, forecaster, &req.inputs, req.today).await
    });

    let duration_ms = start.elapsed().as_millis();
    JobResult {
        inputs: req.inputs,
        today: req.today,
        duration_ms,
        result: result.map(Arc::new).map_err(|e| {
            log::error!("Pipeline failed for {}: {:#}", label, e);
            e.chain().map(ToString::to_string).collect()
        }),
    }
}
