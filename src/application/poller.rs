// Source poller - Periodic fetch/parse/publish loop for one backend
use crate::application::record_store::{RecordStore, Snapshot};
use crate::application::source_backend::SourceBackend;
use crate::domain::error::DashboardError;
use crate::domain::record::{sort_records, Record};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

pub struct SourcePoller<B: SourceBackend> {
    backend: Arc<B>,
    store: Arc<RecordStore>,
    interval: Duration,
}

impl<B: SourceBackend> SourcePoller<B> {
    pub fn new(backend: Arc<B>, store: Arc<RecordStore>, interval: Duration) -> Self {
        Self {
            backend,
            store,
            interval,
        }
    }

    pub fn records(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    /// Log in once, then poll on every tick until a fatal error.
    ///
    /// Fetch and parse failures only abandon the current cycle; the previous
    /// snapshot stays published. An authentication failure, at login or from a
    /// rejected session, ends the task so the supervisor can start over.
    pub async fn run(self) -> Result<(), DashboardError> {
        let source = self.backend.source();

        tracing::info!(%source, "Logging in");
        let session = self.backend.login().await?;
        tracing::info!(%source, interval = ?self.interval, "Polling started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let start = Instant::now();
            match self.poll_once(&session).await {
                Ok(generation) => {
                    tracing::debug!(
                        %source,
                        generation,
                        records = self.records().len(),
                        elapsed = ?start.elapsed(),
                        "Published snapshot"
                    );
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(%source, error = %e, "Poll cycle abandoned, keeping previous snapshot");
                }
            }
        }
    }

    /// Run one fetch/parse/sort/publish cycle and return the new generation.
    pub async fn poll_once(&self, session: &B::Session) -> Result<u64, DashboardError> {
        let raw = self.backend.fetch(session).await?;
        let fields = self.backend.parse(&raw)?;

        let mut records: Vec<Record> = fields.into_iter().map(Into::into).collect();
        sort_records(&mut records);

        Ok(self.store.replace(records))
    }
}
