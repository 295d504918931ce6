// Button event dispatch - One press at a time, in arrival order
use crate::application::dashboard::DashboardController;
use crate::domain::grid::ButtonEvent;
use futures::stream::{Stream, StreamExt};
use std::time::Duration;

/// Feed device events to the controller until the stream ends. The display
/// name of each pressed record goes to `notify`.
pub async fn dispatch_events<S, F>(controller: &DashboardController, events: S, mut notify: F)
where
    S: Stream<Item = ButtonEvent>,
    F: FnMut(&str),
{
    let mut events = Box::pin(events);

    while let Some(event) = events.next().await {
        tracing::debug!(?event, "Dispatching button event");

        if let Some(record) = controller.handle_event(event).await {
            tracing::info!(record = %record.name(), details = %record.details(), "Grid cell selected");
            notify(record.name());
        }
    }

    tracing::warn!("Button event stream ended");
}

/// Keep dispatching forever, reopening the event stream `reopen_delay` after
/// it ends (for example when the device is unplugged).
pub async fn dispatch_with_reopen<S, O, F>(
    controller: &DashboardController,
    mut open_events: O,
    reopen_delay: Duration,
    mut notify: F,
) where
    S: Stream<Item = ButtonEvent>,
    O: FnMut() -> S,
    F: FnMut(&str),
{
    loop {
        dispatch_events(controller, open_events(), &mut notify).await;
        tokio::time::sleep(reopen_delay).await;
        tracing::info!("Reopening button event stream");
    }
}

/// Operator-facing notification for a pressed record.
pub fn print_notification(name: &str) {
    println!("{}", name);
}
