//! One-shot device position request.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use wxdash_weather::Locator;

use super::DashboardEvent;

/// Ask the locator for the device position once. The outcome, success or
/// not, is sent back as `DashboardEvent::Location`.
pub fn request_locate(tx: &mpsc::UnboundedSender<DashboardEvent>, locator: Locator) -> JoinHandle<()> {
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = locator.locate().await;
        if let Err(e) = &result {
            tracing::info!(error = %e, "Device position unavailable");
        }
        let _ = tx.send(DashboardEvent::Location(result));
    })
}
