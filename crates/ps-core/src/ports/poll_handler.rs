//! Poll tick handler port
//!
//! The platform runtime owns the timer and calls this on every tick; the app
//! layer implements it. The platform crate therefore never depends on the
//! app crate.

use anyhow::Result;

use crate::clipboard::PollOutcome;

#[async_trait::async_trait]
pub trait ChangePollHandler: Send + Sync {
    /// Runs one change check (and capture, if the counter moved).
    async fn on_tick(&self) -> Result<PollOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Never;

    #[async_trait::async_trait]
    impl ChangePollHandler for Never {
        async fn on_tick(&self) -> Result<PollOutcome> {
            Ok(PollOutcome::Unchanged)
        }
    }

    #[tokio::test]
    async fn test_handler_is_object_safe() {
        let handler: Box<dyn ChangePollHandler> = Box::new(Never);
        assert_eq!(handler.on_tick().await.unwrap(), PollOutcome::Unchanged);
    }
}
