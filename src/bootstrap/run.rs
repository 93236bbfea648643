use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, info_span, warn, Instrument};

use ps_app::HistoryService;
use ps_core::clipboard::preview::format_byte_count;
use ps_core::HistoryEvent;

use super::wiring::{wire, RuntimeSettings};

/// Polls until Ctrl-C, logging every history event.
pub async fn run(settings: RuntimeSettings) -> anyhow::Result<()> {
    info!(
        pasteboard = %settings.pasteboard_kind,
        interval_ms = settings.poll_interval.as_millis() as u64,
        max_entries = settings.max_entries.map(|n| n.get()),
        "Starting PasteShow"
    );

    let handles = wire(&settings);
    let logger = tokio::spawn(
        log_events(handles.service.clone()).instrument(info_span!("runtime.history_events")),
    );

    handles.runtime.start().await?;
    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    handles.runtime.stop().await?;
    logger.abort();

    info!(entries = handles.service.len(), "PasteShow stopped");
    Ok(())
}

async fn log_events(service: Arc<HistoryService>) {
    let mut events = service.subscribe();
    loop {
        match events.recv().await {
            Ok(event) => log_event(&service, &event),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "History event logger fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn log_event(service: &HistoryService, event: &HistoryEvent) {
    match event {
        HistoryEvent::Captured { entry_id, category } => {
            let entry = service.get(0).ok().filter(|e| e.id() == entry_id);
            info!(
                %entry_id,
                %category,
                formats = entry.as_ref().map(|e| e.format_count()),
                size = entry.as_ref().map(|e| format_byte_count(e.total_size_bytes())),
                source = entry
                    .as_ref()
                    .and_then(|e| e.source_application())
                    .map(|app| app.display_name().to_string()),
                history_len = service.len(),
                "Captured pasteboard change"
            );
        }
        HistoryEvent::Evicted { entry_id } => info!(%entry_id, "Evicted oldest entry"),
        HistoryEvent::Promoted { entry_id } => info!(%entry_id, "Promoted entry"),
        HistoryEvent::Removed { entry_id } => info!(%entry_id, "Removed entry"),
        HistoryEvent::SourceSwitched { kind } => info!(%kind, "Switched source"),
        HistoryEvent::Cleared => info!("History cleared"),
    }
}
