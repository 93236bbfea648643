//! Polling change runtime.
//!
//! Owns the timer and nothing else: every tick is handed to a
//! [`ChangePollHandler`], which decides whether the pasteboard changed. An
//! event-driven runtime could replace this without touching upper layers.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Result;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use ps_core::ports::ChangePollHandler;
use ps_core::PollOutcome;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct PollingClipboardRuntime {
    handler: Arc<dyn ChangePollHandler>,
    period: Duration,
    running: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollingClipboardRuntime {
    /// A zero `period` falls back to [`DEFAULT_POLL_INTERVAL`].
    pub fn new(handler: Arc<dyn ChangePollHandler>, period: Duration) -> Self {
        let period = if period.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            period
        };
        Self {
            handler,
            period,
            running: AtomicBool::new(false),
            handle: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Spawns the tick loop. Calling it while running is a no-op.
    pub async fn start(&self) -> Result<()> {
        // Held until the handle is stored so a concurrent stop cannot miss it.
        let mut slot = self.handle.lock().await;
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        let handler = self.handler.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                match handler.on_tick().await {
                    Ok(PollOutcome::Captured { entry_id }) => {
                        debug!(%entry_id, "Poll tick captured a new entry");
                    }
                    Ok(PollOutcome::DiscardedEmpty) => {
                        debug!("Poll tick saw an empty change");
                    }
                    Ok(PollOutcome::Unchanged) => {}
                    Err(err) => {
                        warn!(error = %format!("{err:#}"), "Pasteboard poll failed");
                    }
                }
            }
        });

        *slot = Some(handle);
        info!(period_ms = period.as_millis() as u64, "Pasteboard poller started");

        Ok(())
    }

    /// Aborts the tick loop. Calling it while stopped is a no-op.
    pub async fn stop(&self) -> Result<()> {
        let mut slot = self.handle.lock().await;
        if !self.running.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        if let Some(handle) = slot.take() {
            handle.abort();
        }
        info!("Pasteboard poller stopped");

        Ok(())
    }
}

impl Drop for PollingClipboardRuntime {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}
