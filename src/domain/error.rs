// Error taxonomy shared by pollers, backends and the device
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Session establishment failed, or an established session was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("device write failed: {0}")]
    Device(String),
}

impl DashboardError {
    /// Whether the error should end the poller task rather than just the cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DashboardError::Auth(_))
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_auth_is_fatal() {
        assert!(DashboardError::Auth("bad password".into()).is_fatal());
        assert!(!DashboardError::Fetch("timeout".into()).is_fatal());
        assert!(!DashboardError::Parse("eof".into()).is_fatal());
        assert!(!DashboardError::Device("gone".into()).is_fatal());
    }
}
