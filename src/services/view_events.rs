use std::sync::Arc;

use tokio::sync::mpsc;

use crate::db::EngineStore;
use crate::models::ViewEvent;

/// Sending half of the analytics channel
///
/// Progress writes enqueue one [`ViewEvent`] here after the primary upsert
/// lands. The insert happens on a background task with its own failure
/// channel: analytics loss is tolerated, progress loss is not, so nothing
/// on this path ever reaches the caller.
#[derive(Clone)]
pub struct ViewEventSender {
    tx: mpsc::UnboundedSender<ViewEvent>,
}

impl ViewEventSender {
    /// Enqueues one event; failure to enqueue is logged and dropped
    pub fn emit(&self, event: ViewEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(error = %e, "View event channel closed, dropping event");
        }
    }
}

/// Handle for gracefully shutting down the view event writer
pub struct ViewEventWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl ViewEventWriterHandle {
    /// Signals the writer task to flush pending events and stop
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("View event writer shutdown signal sent");
    }
}

/// Spawns the background task that appends `content_views` rows
pub fn spawn_view_event_writer(
    store: Arc<dyn EngineStore>,
) -> (ViewEventSender, ViewEventWriterHandle) {
    let (tx, mut rx) = mpsc::unbounded_channel::<ViewEvent>();
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    tokio::spawn(async move {
        tracing::info!("View event writer task started");

        loop {
            tokio::select! {
                Some(event) = rx.recv() => {
                    if let Err(e) = store.insert_view_event(&event).await {
                        tracing::warn!(
                            error = %e,
                            profile_id = %event.profile_id,
                            content_id = %event.content_id,
                            "Failed to record view event"
                        );
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("View event writer shutting down, flushing pending events");

                    while let Ok(event) = rx.try_recv() {
                        if let Err(e) = store.insert_view_event(&event).await {
                            tracing::warn!(error = %e, "Failed to flush view event during shutdown");
                        }
                    }

                    tracing::info!("View event writer task stopped");
                    break;
                }
            }
        }
    });

    (ViewEventSender { tx }, ViewEventWriterHandle { shutdown_tx })
}
