use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub monit: MonitSettings,
    pub jenkins: JenkinsSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_monit_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JenkinsSettings {
    pub base_url: String,
    #[serde(default = "default_jenkins_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_render_interval")]
    pub render_interval_secs: u64,
    #[serde(default = "default_restart_delay")]
    pub restart_delay_secs: u64,
    #[serde(default = "default_device_path")]
    pub device_path: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            render_interval_secs: default_render_interval(),
            restart_delay_secs: default_restart_delay(),
            device_path: default_device_path(),
        }
    }
}

impl MonitSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl JenkinsSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl DashboardSettings {
    pub fn render_interval(&self) -> Duration {
        Duration::from_secs(self.render_interval_secs)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay_secs)
    }
}

fn default_monit_interval() -> u64 {
    15
}

fn default_jenkins_interval() -> u64 {
    10
}

fn default_render_interval() -> u64 {
    15
}

fn default_restart_delay() -> u64 {
    5
}

fn default_device_path() -> String {
    "/dev/midi1".to_string()
}

/// Load `config/launchboard.*`, overridable with `LAUNCHBOARD__SECTION__KEY`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/launchboard"))
        .add_source(
            config::Environment::with_prefix("LAUNCHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Join an endpoint path onto a base URL with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
