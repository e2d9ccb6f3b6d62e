use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::args::PositiveUsize;
use crate::error::AppResult;
use crate::http::RateGate;
use crate::report::Reporter;
use crate::request::BuiltRequest;

use super::outcome::{Attempt, Outcome};
use super::transport::{BodyMode, Transport};

type WorkQueue = Arc<Mutex<mpsc::Receiver<BuiltRequest>>>;

#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
    pub workers: PositiveUsize,
    /// Requests per second across all workers; 0 means unlimited.
    pub rate: u32,
    pub dry_run: bool,
    pub body_mode: BodyMode,
}

/// Lifecycle of a single run. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Idle,
    Dispatching,
    Draining,
    Reporting,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Dispatching => "dispatching",
            RunPhase::Draining => "draining",
            RunPhase::Reporting => "reporting",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Runs one batch. Build a new dispatcher for every run.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    config: DispatchConfig,
    phase: RunPhase,
}

impl Dispatcher {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: DispatchConfig) -> Self {
        Self {
            transport,
            config,
            phase: RunPhase::Idle,
        }
    }

    fn advance(&mut self, next: RunPhase) {
        if next > self.phase {
            debug!("dispatch phase: {} -> {}", self.phase, next);
            self.phase = next;
        }
    }

    /// Dispatches every request and hands the full outcome set to `reporter`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the reporter cannot write its output.
    pub async fn run<R>(
        mut self,
        requests: Vec<BuiltRequest>,
        cancel: CancellationToken,
        reporter: &mut R,
    ) -> AppResult<Vec<Outcome>>
    where
        R: Reporter + ?Sized,
    {
        let outcomes = self.dispatch(requests, cancel).await;
        self.advance(RunPhase::Reporting);
        reporter.report(&outcomes)?;
        self.advance(RunPhase::Done);
        Ok(outcomes)
    }

    /// Sends every queued request at most once and collects the outcomes.
    ///
    /// The queue is filled and closed before any worker starts. Workers check
    /// `cancel` before taking each request; a request already taken always
    /// runs to completion and produces an outcome.
    pub async fn dispatch(
        &mut self,
        requests: Vec<BuiltRequest>,
        cancel: CancellationToken,
    ) -> Vec<Outcome> {
        let total = requests.len();
        let capacity = total.max(1);

        let (queue_tx, queue_rx) = mpsc::channel(capacity);
        for request in requests {
            if let Err(err) = queue_tx.try_send(request) {
                warn!("dropping request, work queue rejected it: {}", err);
            }
        }
        drop(queue_tx);
        let queue: WorkQueue = Arc::new(Mutex::new(queue_rx));

        let (outcome_tx, mut outcome_rx) = mpsc::channel(capacity);
        let gate = RateGate::start(self.config.rate).map(Arc::new);
        if let Some(gate) = gate.as_ref() {
            debug!("rate limited to one request every {:?}", gate.period());
        }

        self.advance(RunPhase::Dispatching);
        info!(
            "dispatching {} requests with {} workers",
            total,
            self.config.workers.get()
        );

        let mut handles = Vec::with_capacity(self.config.workers.get());
        for worker_id in 0..self.config.workers.get() {
            let worker = Worker {
                id: worker_id,
                queue: Arc::clone(&queue),
                outcomes: outcome_tx.clone(),
                gate: gate.clone(),
                transport: Arc::clone(&self.transport),
                dry_run: self.config.dry_run,
                body_mode: self.config.body_mode,
                cancel: cancel.clone(),
            };
            handles.push(tokio::spawn(worker.run()));
        }
        drop(outcome_tx);

        self.advance(RunPhase::Draining);
        for handle in handles {
            if let Err(err) = handle.await {
                error!("worker task failed: {}", err);
            }
        }

        if let Some(gate) = gate {
            match Arc::try_unwrap(gate) {
                Ok(gate) => gate.stop(),
                Err(shared) => drop(shared),
            }
        }

        outcome_rx.close();
        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = outcome_rx.recv().await {
            outcomes.push(outcome);
        }
        debug!("collected {} of {} outcomes", outcomes.len(), total);
        outcomes
    }
}

struct Worker {
    id: usize,
    queue: WorkQueue,
    outcomes: mpsc::Sender<Outcome>,
    gate: Option<Arc<RateGate>>,
    transport: Arc<dyn Transport>,
    dry_run: bool,
    body_mode: BodyMode,
    cancel: CancellationToken,
}

impl Worker {
    async fn run(self) {
        loop {
            if self.cancel.is_cancelled() {
                info!("worker {} stopped due to cancellation", self.id);
                break;
            }

            let next = self.queue.lock().await.recv().await;
            let Some(request) = next else {
                break;
            };

            if let Some(gate) = self.gate.as_ref()
                && !gate.acquire().await
            {
                break;
            }

            let attempt = if self.dry_run {
                Attempt::NotSent
            } else {
                match self.transport.send(&request, self.body_mode).await {
                    Ok(response) => {
                        debug!(
                            "{} {} -> {} ({} body bytes)",
                            request.method(),
                            request.url(),
                            response.status,
                            response.body_len
                        );
                        Attempt::Response(response)
                    }
                    Err(err) => {
                        debug!("request to {} failed: {}", request.url(), err);
                        Attempt::Failed(err)
                    }
                }
            };

            if self.outcomes.send(Outcome { request, attempt }).await.is_err() {
                break;
            }
        }
    }
}
