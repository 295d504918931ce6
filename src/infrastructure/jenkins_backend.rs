// Jenkins backend - cctray project feed (cc.xml)
use crate::application::source_backend::SourceBackend;
use crate::domain::error::DashboardError;
use crate::domain::record::{Activity, BuildRecord, BuildStatus, Record};
use crate::domain::source::SourceId;
use crate::infrastructure::config::join_url;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;

const CC_XML: &str = "/cc.xml";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct JenkinsBackend {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CcProjects {
    #[serde(rename = "Project", default)]
    projects: Vec<CcProject>,
}

#[derive(Debug, Deserialize)]
pub struct CcProject {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@activity", default)]
    activity: String,
    #[serde(rename = "@lastBuildStatus", default)]
    last_build_status: String,
    #[serde(rename = "@lastBuildLabel", default)]
    last_build_label: String,
    #[serde(rename = "@lastBuildTime", default)]
    last_build_time: String,
    #[serde(rename = "@webUrl", default)]
    web_url: String,
}

impl JenkinsBackend {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl SourceBackend for JenkinsBackend {
    type Session = ();
    type Fields = CcProject;

    fn source(&self) -> SourceId {
        SourceId::Builds
    }

    async fn login(&self) -> Result<(), DashboardError> {
        Ok(())
    }

    async fn fetch(&self, _session: &()) -> Result<Bytes, DashboardError> {
        let url = join_url(&self.base_url, CC_XML);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DashboardError::Fetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        Ok(response.bytes().await?)
    }

    fn parse(&self, raw: &[u8]) -> Result<Vec<CcProject>, DashboardError> {
        let feed = serde_xml_rs::from_reader::<CcProjects, _>(raw)
            .map_err(|e| DashboardError::Parse(e.to_string()))?;
        Ok(feed.projects)
    }
}

impl From<CcProject> for BuildRecord {
    fn from(project: CcProject) -> Self {
        BuildRecord {
            last_build_time: DateTime::parse_from_rfc3339(&project.last_build_time).ok(),
            last_build_status: BuildStatus::from(project.last_build_status.as_str()),
            activity: Activity::from(project.activity.as_str()),
            name: project.name,
            web_url: project.web_url,
            last_build_label: project.last_build_label,
        }
    }
}

impl From<CcProject> for Record {
    fn from(project: CcProject) -> Self {
        Record::Build(project.into())
    }
}
