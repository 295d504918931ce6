// Main entry point - Wiring of pollers, dashboard and device
mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard::DashboardController;
use crate::application::grid_device::GridDevice;
use crate::application::record_store::RecordStore;
use crate::application::supervisor::supervise;
use crate::domain::source::SourceId;
use crate::infrastructure::config::load_config;
use crate::infrastructure::jenkins_backend::JenkinsBackend;
use crate::infrastructure::launchpad_device::{button_events, LaunchpadDevice};
use crate::infrastructure::mmonit_backend::MonitBackend;
use crate::presentation::event_dispatch::{dispatch_with_reopen, print_notification};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config().context("Failed to load config/launchboard")?;
    let restart_delay = config.dashboard.restart_delay();

    // Create backends (infrastructure layer)
    let monit = Arc::new(MonitBackend::new(
        config.monit.base_url.clone(),
        config.monit.username.clone(),
        config.monit.password.clone(),
    ));
    let jenkins = Arc::new(JenkinsBackend::new(config.jenkins.base_url.clone())?);

    // One snapshot store per source, each written only by its poller
    let hosts = Arc::new(RecordStore::new());
    let builds = Arc::new(RecordStore::new());

    tokio::spawn(supervise(
        monit,
        hosts.clone(),
        config.monit.poll_interval(),
        restart_delay,
    ));
    tokio::spawn(supervise(
        jenkins,
        builds.clone(),
        config.jenkins.poll_interval(),
        restart_delay,
    ));

    // Open the grid and start blank
    let device = Arc::new(LaunchpadDevice::open(&config.dashboard.device_path).await?);
    if let Err(e) = device.clear_all().await {
        tracing::warn!(error = %e, "Failed to clear grid at startup");
    }
    let device_path = device.path().to_path_buf();

    let controller = Arc::new(
        DashboardController::new(device)
            .with_source(SourceId::Monitor, hosts)
            .with_source(SourceId::Builds, builds),
    );

    let render_interval = config.dashboard.render_interval();
    let renderer = controller.clone();
    tokio::spawn(async move { renderer.run_render_loop(render_interval).await });

    let dispatcher = controller.clone();
    tokio::spawn(async move {
        dispatch_with_reopen(
            &dispatcher,
            || button_events(device_path.clone()),
            restart_delay,
            print_notification,
        )
        .await
    });

    tracing::info!(
        device = %config.dashboard.device_path,
        "Dashboard running; scene 1 shows hosts, scene 2 builds, scene 3 blanks"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
