// Record domain models - Hosts and builds as shown on the grid
use super::indicator::IndicatorCode;
use chrono::{DateTime, FixedOffset};

/// A monitored host as reported by the fleet monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    pub id: String,
    pub host: String,
    /// Raw status code from the monitor; its meaning belongs to the backend.
    pub led: Option<String>,
    pub cpu: f64,
    pub mem: f64,
    pub events: u64,
    pub status: Option<String>,
}

impl StatusRecord {
    pub fn indicator_code(&self) -> IndicatorCode {
        IndicatorCode::from_status_code(self.led.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Failure,
    Unstable,
    Unknown,
    Other(String),
}

impl From<&str> for BuildStatus {
    fn from(value: &str) -> Self {
        match value {
            "Success" => BuildStatus::Success,
            "Failure" => BuildStatus::Failure,
            "Unstable" => BuildStatus::Unstable,
            "Unknown" => BuildStatus::Unknown,
            other => BuildStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Building,
    Idle,
    Other(String),
}

impl From<&str> for Activity {
    fn from(value: &str) -> Self {
        match value {
            "Building" => Activity::Building,
            // cctray reports an idle project as "Sleeping"
            "Idle" | "Sleeping" => Activity::Idle,
            other => Activity::Other(other.to_string()),
        }
    }
}

/// A CI project as reported by the build server. Keyed by its name.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    pub name: String,
    pub web_url: String,
    pub last_build_label: String,
    pub last_build_time: Option<DateTime<FixedOffset>>,
    pub last_build_status: BuildStatus,
    pub activity: Activity,
}

impl BuildRecord {
    pub fn indicator_code(&self) -> IndicatorCode {
        if self.activity == Activity::Building {
            return IndicatorCode::RedGreenBlink;
        }

        match self.last_build_status {
            BuildStatus::Success => IndicatorCode::GreenOnly,
            BuildStatus::Failure | BuildStatus::Unstable => IndicatorCode::Red,
            BuildStatus::Unknown => IndicatorCode::Off,
            BuildStatus::Other(_) => IndicatorCode::Dim,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Status(StatusRecord),
    Build(BuildRecord),
}

impl Record {
    /// Display name shown to the operator.
    pub fn name(&self) -> &str {
        match self {
            Record::Status(r) => &r.host,
            Record::Build(r) => &r.name,
        }
    }

    /// Records within a snapshot are ordered by this key, byte-wise.
    pub fn sort_key(&self) -> &str {
        self.name()
    }

    pub fn indicator_code(&self) -> IndicatorCode {
        match self {
            Record::Status(r) => r.indicator_code(),
            Record::Build(r) => r.indicator_code(),
        }
    }

    /// One-line summary of the backend fields, for logs.
    pub fn details(&self) -> String {
        match self {
            Record::Status(r) => format!(
                "id={} cpu={:.1}% mem={:.1}% events={} status={}",
                r.id,
                r.cpu,
                r.mem,
                r.events,
                r.status.as_deref().unwrap_or("-")
            ),
            Record::Build(r) => format!(
                "build={} status={:?} activity={:?} at={} url={}",
                r.last_build_label,
                r.last_build_status,
                r.activity,
                r.last_build_time
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string()),
                r.web_url
            ),
        }
    }
}

impl From<StatusRecord> for Record {
    fn from(record: StatusRecord) -> Self {
        Record::Status(record)
    }
}

impl From<BuildRecord> for Record {
    fn from(record: BuildRecord) -> Self {
        Record::Build(record)
    }
}

/// Sort records into snapshot order. Stable, so equal names keep fetch order.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
}
