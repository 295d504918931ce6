// Poller supervision - Restart a crashed poller with fresh state
use crate::application::poller::SourcePoller;
use crate::application::record_store::RecordStore;
use crate::application::source_backend::SourceBackend;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Keep a poller for `backend` running forever.
///
/// Each attempt runs in its own task. When the task returns an error or
/// panics, the supervisor waits `restart_delay`, clears the store and starts a
/// new poller, which logs in again. Nothing here touches other sources.
pub async fn supervise<B: SourceBackend>(
    backend: Arc<B>,
    store: Arc<RecordStore>,
    poll_interval: Duration,
    restart_delay: Duration,
) {
    let source = backend.source();
    let mut attempt: u64 = 0;
    // Owns the running poller; dropping the supervisor aborts it.
    let mut running = JoinSet::new();

    loop {
        attempt += 1;
        if attempt > 1 {
            let generation = store.reset();
            tracing::info!(%source, attempt, generation, "Restarting poller");
        }

        let poller = SourcePoller::new(backend.clone(), store.clone(), poll_interval);
        running.spawn(poller.run());

        match running.join_next().await {
            Some(Ok(Ok(()))) | None => tracing::error!(%source, "Poller exited unexpectedly"),
            Some(Ok(Err(e))) => tracing::error!(%source, error = %e, "Poller crashed"),
            Some(Err(e)) if e.is_panic() => tracing::error!(%source, "Poller panicked"),
            Some(Err(e)) => tracing::error!(%source, error = %e, "Poller task was cancelled"),
        }

        tokio::time::sleep(restart_delay).await;
    }
}
