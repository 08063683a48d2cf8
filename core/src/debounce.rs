use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::Instrument;

/// A callback scheduled to run once after a delay. Cancelling (or dropping)
/// the handle before the delay elapses guarantees the callback never runs.
///
/// Only the wait is owned by this handle: whatever the callback spawns keeps
/// running after it fires.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
}

impl ScheduledTask {
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let task = tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                callback();
            }
            .in_current_span(),
        );
        Self {
            handle: task.abort_handle(),
        }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the callback has run or the task was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
