// Device trait for the 8x8 button/LED grid
use crate::domain::error::DashboardError;
use crate::domain::grid::GridPosition;
use crate::domain::indicator::LedColor;
use async_trait::async_trait;

#[async_trait]
pub trait GridDevice: Send + Sync {
    /// Light one cell. Fails with `DashboardError::Device`.
    async fn set_cell(&self, position: GridPosition, color: LedColor) -> Result<(), DashboardError>;

    /// Turn every LED off.
    async fn clear_all(&self) -> Result<(), DashboardError>;
}
