//! Dependency assembly.
//!
//! The only place that knows about `ps-app` and `ps-platform` at once. It
//! turns the config DTO into runtime settings (applying defaults for empty
//! values), picks the pasteboard adapter and connects the service to the
//! poller.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use ps_app::HistoryService;
use ps_core::ports::PasteboardPort;
use ps_core::{AppConfig, PasteboardKind};
use ps_platform::{PollingClipboardRuntime, SystemClock, DEFAULT_POLL_INTERVAL};

/// Settings after defaults were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub poll_interval: Duration,
    pub max_entries: Option<NonZeroUsize>,
    pub pasteboard_kind: PasteboardKind,
}

impl RuntimeSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let poll_interval = match config.poll_interval_ms {
            0 => DEFAULT_POLL_INTERVAL,
            ms => Duration::from_millis(ms),
        };

        let max_entries = usize::try_from(config.max_history_entries)
            .ok()
            .and_then(NonZeroUsize::new);

        let pasteboard_kind = if config.pasteboard_kind.trim().is_empty() {
            PasteboardKind::default()
        } else {
            config.pasteboard_kind.parse().unwrap_or_else(|err| {
                warn!(error = %err, "Falling back to the general pasteboard");
                PasteboardKind::default()
            })
        };

        Self {
            poll_interval,
            max_entries,
            pasteboard_kind,
        }
    }
}

/// Configured log directory; `None` when empty.
///
/// Read on its own because tracing has to be installed before
/// [`RuntimeSettings::from_config`] can report anything.
pub fn log_directory(config: &AppConfig) -> Option<PathBuf> {
    (!config.log_directory.as_os_str().is_empty()).then(|| config.log_directory.clone())
}

pub struct AppHandles {
    pub service: Arc<HistoryService>,
    pub runtime: PollingClipboardRuntime,
}

pub fn wire(settings: &RuntimeSettings) -> AppHandles {
    wire_with(settings, create_pasteboard(settings.pasteboard_kind))
}

/// Wiring with an explicit pasteboard adapter.
pub fn wire_with(settings: &RuntimeSettings, pasteboard: Arc<dyn PasteboardPort>) -> AppHandles {
    let service = Arc::new(HistoryService::new(
        pasteboard,
        Arc::new(SystemClock),
        settings.max_entries,
    ));
    let runtime = PollingClipboardRuntime::new(service.clone(), settings.poll_interval);
    AppHandles { service, runtime }
}

#[cfg(target_os = "macos")]
pub fn create_pasteboard(kind: PasteboardKind) -> Arc<dyn PasteboardPort> {
    Arc::new(ps_platform::MacOsPasteboard::new(kind))
}

#[cfg(not(target_os = "macos"))]
pub fn create_pasteboard(kind: PasteboardKind) -> Arc<dyn PasteboardPort> {
    warn!(%kind, "No system pasteboard on this platform, using an in-memory one");
    Arc::new(ps_platform::InMemoryPasteboard::new(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gets_defaults() {
        let settings = RuntimeSettings::from_config(&AppConfig::empty());

        assert_eq!(settings.poll_interval, Duration::from_millis(250));
        assert_eq!(settings.max_entries, None);
        assert_eq!(settings.pasteboard_kind, PasteboardKind::General);
        assert_eq!(log_directory(&AppConfig::empty()), None);
    }

    #[test]
    fn test_explicit_values_are_used() {
        let config = AppConfig {
            poll_interval_ms: 100,
            max_history_entries: 10,
            pasteboard_kind: "Drag".into(),
            log_directory: PathBuf::from("/var/log/pasteshow"),
        };

        let settings = RuntimeSettings::from_config(&config);

        assert_eq!(settings.poll_interval, Duration::from_millis(100));
        assert_eq!(settings.max_entries, NonZeroUsize::new(10));
        assert_eq!(settings.pasteboard_kind, PasteboardKind::Drag);
        assert_eq!(
            log_directory(&config),
            Some(PathBuf::from("/var/log/pasteshow"))
        );
    }

    #[test]
    fn test_unknown_kind_falls_back_to_general() {
        let config = AppConfig {
            pasteboard_kind: "find".into(),
            ..AppConfig::empty()
        };

        let settings = RuntimeSettings::from_config(&config);

        assert_eq!(settings.pasteboard_kind, PasteboardKind::General);
    }

    #[tokio::test]
    async fn test_wired_runtime_feeds_service() {
        let pasteboard = Arc::new(ps_platform::InMemoryPasteboard::new(PasteboardKind::General));
        pasteboard.copy_text("wired");
        let settings = RuntimeSettings {
            poll_interval: Duration::from_millis(10),
            ..RuntimeSettings::from_config(&AppConfig::empty())
        };

        let handles = wire_with(&settings, pasteboard);
        handles.runtime.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        handles.runtime.stop().await.unwrap();

        assert_eq!(handles.service.len(), 1);
    }

    #[tokio::test]
    async fn test_restarted_runtime_does_not_recapture_unchanged_contents() {
        let pasteboard = Arc::new(ps_platform::InMemoryPasteboard::new(PasteboardKind::General));
        pasteboard.copy_text("kept");
        let settings = RuntimeSettings {
            poll_interval: Duration::from_millis(10),
            ..RuntimeSettings::from_config(&AppConfig::empty())
        };

        let handles = wire_with(&settings, pasteboard.clone());
        handles.runtime.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        handles.runtime.stop().await.unwrap();
        assert_eq!(handles.service.len(), 1);

        handles.runtime.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        handles.runtime.stop().await.unwrap();
        assert_eq!(handles.service.len(), 1);

        pasteboard.copy_text("new");
        handles.runtime.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        handles.runtime.stop().await.unwrap();
        assert_eq!(handles.service.len(), 2);
    }
}
