// In-memory fakes for the backend and device traits
use crate::application::grid_device::GridDevice;
use crate::application::source_backend::SourceBackend;
use crate::domain::error::DashboardError;
use crate::domain::grid::GridPosition;
use crate::domain::indicator::LedColor;
use crate::domain::record::{Activity, BuildRecord, BuildStatus, Record, StatusRecord};
use crate::domain::source::SourceId;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn status_record(host: &str, led: &str) -> Record {
    Record::Status(host_fields(host, led))
}

pub fn host_fields(host: &str, led: &str) -> StatusRecord {
    StatusRecord {
        id: format!("id-{}", host),
        host: host.to_string(),
        led: Some(led.to_string()),
        cpu: 1.5,
        mem: 20.0,
        events: 0,
        status: None,
    }
}

pub fn build_record(name: &str, status: &str, activity: &str) -> Record {
    Record::Build(BuildRecord {
        name: name.to_string(),
        web_url: format!("http://ci.example/job/{}/", name),
        last_build_label: "1".to_string(),
        last_build_time: None,
        last_build_status: BuildStatus::from(status),
        activity: Activity::from(activity),
    })
}

/// One scripted response for a fetch call.
#[derive(Debug, Clone)]
pub enum Cycle {
    /// Hosts as `(name, led)` pairs, in fetch order.
    Hosts(Vec<(&'static str, &'static str)>),
    FetchError,
    ParseError,
    SessionExpired,
    Panic,
}

/// Backend that replays a script of fetch outcomes. Once the script runs out
/// every fetch fails with a fetch error.
pub struct ScriptedBackend {
    cycles: Mutex<VecDeque<Cycle>>,
    login_failures: AtomicUsize,
    pub logins: AtomicUsize,
    pub fetches: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(cycles: Vec<Cycle>) -> Self {
        Self {
            cycles: Mutex::new(cycles.into()),
            login_failures: AtomicUsize::new(0),
            logins: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Make the first `count` login attempts fail.
    pub fn failing_logins(self, count: usize) -> Self {
        self.login_failures.store(count, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl SourceBackend for ScriptedBackend {
    type Session = ();
    type Fields = StatusRecord;

    fn source(&self) -> SourceId {
        SourceId::Monitor
    }

    async fn login(&self) -> Result<(), DashboardError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        let remaining = self.login_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.login_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(DashboardError::Auth("bad credentials".to_string()));
        }
        Ok(())
    }

    async fn fetch(&self, _session: &()) -> Result<Bytes, DashboardError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let cycle = self.cycles.lock().unwrap().pop_front();

        match cycle {
            Some(Cycle::Hosts(hosts)) => {
                let body = hosts
                    .iter()
                    .map(|(host, led)| format!("{}={}", host, led))
                    .collect::<Vec<_>>()
                    .join(";");
                Ok(Bytes::from(body))
            }
            Some(Cycle::ParseError) => Ok(Bytes::from_static(b"!garbage")),
            Some(Cycle::SessionExpired) => Err(DashboardError::Auth("session expired".to_string())),
            Some(Cycle::Panic) => panic!("backend blew up"),
            Some(Cycle::FetchError) | None => Err(DashboardError::Fetch("connection refused".to_string())),
        }
    }

    fn parse(&self, raw: &[u8]) -> Result<Vec<StatusRecord>, DashboardError> {
        let body = std::str::from_utf8(raw).map_err(|e| DashboardError::Parse(e.to_string()))?;
        if body.starts_with('!') {
            return Err(DashboardError::Parse("unexpected token".to_string()));
        }

        body.split(';')
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (host, led) = entry
                    .split_once('=')
                    .ok_or_else(|| DashboardError::Parse(entry.to_string()))?;
                Ok(host_fields(host, led))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Set(GridPosition, LedColor),
    Clear,
}

/// Device that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingDevice {
    calls: Mutex<Vec<DeviceCall>>,
    failing: AtomicBool,
    write_delay: Option<Duration>,
}

impl RecordingDevice {
    /// Each `set_cell` takes `delay` before it lands.
    pub fn slow(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<DeviceCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, call: DeviceCall) -> Result<(), DashboardError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DashboardError::Device("unplugged".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl GridDevice for RecordingDevice {
    async fn set_cell(&self, position: GridPosition, color: LedColor) -> Result<(), DashboardError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        self.record(DeviceCall::Set(position, color))
    }

    async fn clear_all(&self) -> Result<(), DashboardError> {
        self.record(DeviceCall::Clear)
    }
}
