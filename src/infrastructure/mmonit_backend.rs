// M/Monit backend - Session login and host status list
use crate::application::source_backend::SourceBackend;
use crate::domain::error::DashboardError;
use crate::domain::record::{Record, StatusRecord};
use crate::domain::source::SourceId;
use crate::infrastructure::config::join_url;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const LOGIN_PAGE: &str = "/";
const LOGIN_ACTION: &str = "/z_security_check";
const HOST_LIST: &str = "/json/status/list";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct MonitBackend {
    base_url: String,
    username: String,
    password: String,
}

/// Cookie-carrying client; M/Monit tracks the login in its session cookie.
pub struct MonitSession {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MonitStatusList {
    #[serde(default)]
    records: Vec<MonitHost>,
}

/// One row of the host list. M/Monit is loose about numbers vs strings here.
#[derive(Debug, Deserialize)]
pub struct MonitHost {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    led: Value,
    host: String,
    #[serde(default)]
    events: Value,
    #[serde(default)]
    cpu: Value,
    #[serde(default)]
    mem: Value,
    #[serde(default)]
    status: Option<String>,
}

impl MonitBackend {
    pub fn new(base_url: String, username: String, password: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl SourceBackend for MonitBackend {
    type Session = MonitSession;
    type Fields = MonitHost;

    fn source(&self) -> SourceId {
        SourceId::Monitor
    }

    async fn login(&self) -> Result<MonitSession, DashboardError> {
        let auth = |e: reqwest::Error| DashboardError::Auth(e.to_string());

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(auth)?;

        // The login page hands out the session cookie the form post must carry
        let page = client.get(self.url(LOGIN_PAGE)).send().await.map_err(auth)?;
        if !page.status().is_success() {
            return Err(DashboardError::Auth(format!(
                "login page returned {}",
                page.status()
            )));
        }

        let response = client
            .post(self.url(LOGIN_ACTION))
            .form(&[
                ("z_username", self.username.as_str()),
                ("z_password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(auth)?;

        if !response.status().is_success() {
            return Err(DashboardError::Auth(format!(
                "login returned {}",
                response.status()
            )));
        }

        // A rejected login serves the form again
        let body = response.text().await.map_err(auth)?;
        if body.contains(LOGIN_ACTION.trim_start_matches('/')) {
            return Err(DashboardError::Auth(format!(
                "credentials for {} were rejected",
                self.username
            )));
        }

        tracing::debug!(base_url = %self.base_url, "M/Monit session established");
        Ok(MonitSession { client })
    }

    async fn fetch(&self, session: &MonitSession) -> Result<Bytes, DashboardError> {
        let response = session.client.post(self.url(HOST_LIST)).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DashboardError::Auth(format!(
                "session rejected with {}",
                response.status()
            ))),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(DashboardError::Fetch(format!(
                    "host list returned {}: {}",
                    status, body
                )))
            }
            _ => Ok(response.bytes().await?),
        }
    }

    fn parse(&self, raw: &[u8]) -> Result<Vec<MonitHost>, DashboardError> {
        let list: MonitStatusList =
            serde_json::from_slice(raw).map_err(|e| DashboardError::Parse(e.to_string()))?;
        Ok(list.records)
    }
}

/// String or number as its text form; anything else is absent.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    }
}

impl From<MonitHost> for StatusRecord {
    fn from(host: MonitHost) -> Self {
        StatusRecord {
            id: value_text(&host.id).unwrap_or_default(),
            led: value_text(&host.led),
            cpu: value_number(&host.cpu).unwrap_or_default(),
            mem: value_number(&host.mem).unwrap_or_default(),
            events: value_number(&host.events).map(|n| n as u64).unwrap_or_default(),
            status: host.status,
            host: host.host,
        }
    }
}

impl From<MonitHost> for Record {
    fn from(host: MonitHost) -> Self {
        Record::Status(host.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorCode;

    fn backend() -> MonitBackend {
        MonitBackend::new(
            "http://mmonit.example:8080/".to_string(),
            "admin".to_string(),
            "swordfish".to_string(),
        )
    }

    #[test]
    fn test_urls() {
        let backend = backend();
        assert_eq!(backend.url(HOST_LIST), "http://mmonit.example:8080/json/status/list");
        assert_eq!(backend.url(LOGIN_ACTION), "http://mmonit.example:8080/z_security_check");
    }

    #[test]
    fn test_parse_host_list() {
        let body = br#"{
            "records": [
                {"id": 3, "led": 2, "host": "web01", "events": 4, "cpu": 12.5, "mem": "40.1%", "status": "All services are running"},
                {"id": "7", "led": "0", "host": "db01", "events": 0, "cpu": 0, "mem": 0}
            ]
        }"#;

        let records: Vec<StatusRecord> = backend()
            .parse(body)
            .unwrap()
            .into_iter()
            .map(Into::into)
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "3");
        assert_eq!(records[0].host, "web01");
        assert_eq!(records[0].led.as_deref(), Some("2"));
        assert_eq!(records[0].events, 4);
        assert_eq!(records[0].cpu, 12.5);
        assert_eq!(records[0].mem, 40.1);
        assert_eq!(records[0].indicator_code(), IndicatorCode::GreenOnly);
        assert_eq!(records[1].id, "7");
        assert_eq!(records[1].indicator_code(), IndicatorCode::Red);
        assert_eq!(records[1].status, None);
    }

    #[test]
    fn test_missing_led_is_off() {
        let body = br#"{"records": [{"id": 1, "host": "new-host"}]}"#;

        let records = backend().parse(body).unwrap();
        let record: Record = records.into_iter().next().unwrap().into();

        assert_eq!(record.indicator_code(), IndicatorCode::Off);
    }

    #[test]
    fn test_empty_list() {
        assert!(backend().parse(br#"{"records": []}"#).unwrap().is_empty());
        assert!(backend().parse(br#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let result = backend().parse(b"<html>login</html>");
        assert!(matches!(result, Err(DashboardError::Parse(_))));

        let result = backend().parse(br#"{"records": [{"id": 1}]}"#);
        assert!(matches!(result, Err(DashboardError::Parse(_))));
    }
}
