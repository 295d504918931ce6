// Backend trait for fetching and parsing one data source
use crate::domain::error::DashboardError;
use crate::domain::record::Record;
use crate::domain::source::SourceId;
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SourceBackend: Send + Sync + 'static {
    /// Long-lived I/O session; `()` for backends without session state.
    type Session: Send + Sync + 'static;

    /// Raw field set for one record, as read from the response body.
    type Fields: Into<Record> + Send;

    fn source(&self) -> SourceId;

    /// Establish a session. Fails with `DashboardError::Auth`.
    async fn login(&self) -> Result<Self::Session, DashboardError>;

    /// Fetch the raw record list. Fails with `DashboardError::Fetch`, or with
    /// `DashboardError::Auth` when the backend rejects the session.
    async fn fetch(&self, session: &Self::Session) -> Result<Bytes, DashboardError>;

    /// Parse a response body. Fails with `DashboardError::Parse`.
    fn parse(&self, raw: &[u8]) -> Result<Vec<Self::Fields>, DashboardError>;
}
