// Dashboard controller - Active source selection, rendering and button handling
use crate::application::grid_device::GridDevice;
use crate::application::record_store::{RecordStore, Snapshot};
use crate::domain::error::DashboardError;
use crate::domain::grid::{ButtonEvent, GridPosition, GRID_CELLS};
use crate::domain::record::Record;
use crate::domain::source::{SceneAction, SourceId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

const NO_SOURCE: u8 = 0;
const MONITOR: u8 = 1;
const BUILDS: u8 = 2;

/// Which source the grid is showing. Written only by event handling.
#[derive(Debug)]
pub struct DashboardState {
    active: AtomicU8,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            active: AtomicU8::new(NO_SOURCE),
        }
    }

    pub fn active(&self) -> Option<SourceId> {
        match self.active.load(Ordering::Acquire) {
            MONITOR => Some(SourceId::Monitor),
            BUILDS => Some(SourceId::Builds),
            _ => None,
        }
    }

    pub fn select(&self, source: Option<SourceId>) {
        let value = match source {
            None => NO_SOURCE,
            Some(SourceId::Monitor) => MONITOR,
            Some(SourceId::Builds) => BUILDS,
        };
        self.active.store(value, Ordering::Release);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DashboardController {
    state: DashboardState,
    sources: HashMap<SourceId, Arc<RecordStore>>,
    device: Arc<dyn GridDevice>,
    /// Held for a whole render or scene change so their device writes never interleave.
    grid: Mutex<()>,
}

impl DashboardController {
    pub fn new(device: Arc<dyn GridDevice>) -> Self {
        Self {
            state: DashboardState::new(),
            sources: HashMap::new(),
            device,
            grid: Mutex::new(()),
        }
    }

    pub fn with_source(mut self, source: SourceId, store: Arc<RecordStore>) -> Self {
        self.sources.insert(source, store);
        self
    }

    pub fn active_source(&self) -> Option<SourceId> {
        self.state.active()
    }

    fn active_snapshot(&self) -> Option<Arc<Snapshot>> {
        let source = self.state.active()?;
        self.sources.get(&source).map(|store| store.snapshot())
    }

    /// Push the active source's snapshot to the grid and return how many
    /// cells were written. Records past the last cell are dropped and `Off`
    /// records are skipped.
    pub async fn render(&self) -> Result<usize, DashboardError> {
        let _grid = self.grid.lock().await;
        self.render_locked().await
    }

    async fn render_locked(&self) -> Result<usize, DashboardError> {
        let Some(snapshot) = self.active_snapshot() else {
            return Ok(0);
        };
        if snapshot.is_empty() {
            return Ok(0);
        }

        let mut written = 0;
        for (index, record) in snapshot.records.iter().enumerate().take(GRID_CELLS) {
            let Some(position) = GridPosition::from_index(index) else {
                break;
            };

            let code = record.indicator_code();
            if code.is_off() {
                continue;
            }

            self.device.set_cell(position, code.color()).await?;
            written += 1;
        }

        tracing::trace!(
            generation = snapshot.generation,
            records = snapshot.len(),
            written,
            "Rendered grid"
        );
        Ok(written)
    }

    pub async fn run_render_loop(&self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.render().await {
                tracing::warn!(error = %e, "Render cycle abandoned");
            }
        }
    }

    /// React to one button press. Returns the record to show the operator when
    /// a grid press lands on one.
    pub async fn handle_event(&self, event: ButtonEvent) -> Option<Record> {
        match event {
            ButtonEvent::SceneSelect(scene) => {
                match SceneAction::from_scene(scene) {
                    Some(action) => self.apply_scene(action).await,
                    None => tracing::debug!(scene, "Ignoring unmapped scene button"),
                }
                None
            }
            ButtonEvent::GridPress(position) => self.record_at(position),
        }
    }

    async fn apply_scene(&self, action: SceneAction) {
        let target = action.target();
        let _grid = self.grid.lock().await;

        match target {
            Some(source) => tracing::info!(%source, "Showing source"),
            None => tracing::info!("Blanking grid"),
        }

        self.state.select(target);

        if let Err(e) = self.device.clear_all().await {
            tracing::warn!(error = %e, "Failed to clear grid");
            return;
        }

        if target.is_some() {
            if let Err(e) = self.render_locked().await {
                tracing::warn!(error = %e, "Render after scene change abandoned");
            }
        }
    }

    /// The record shown at `position` for the active source, if any.
    pub fn record_at(&self, position: GridPosition) -> Option<Record> {
        let snapshot = self.active_snapshot()?;
        snapshot.get(position.index()).cloned()
    }
}
