//! Repeating timers for slider autoplay.
//!
//! A [`Scheduler`] arms a repeating task and hands back a [`TaskHandle`].
//! Each task carries an [`AutoplayToken`]; the controller only honours ticks
//! whose token matches the handle it currently owns, so ticks that were
//! already queued when a handle got cancelled are dropped.

mod manual;
mod service;

use std::time::Duration;

pub use manual::{ManualHandle, ManualScheduler, ScheduledTask};
pub use service::{AutoplayTick, SliderId, TokioScheduler, TokioTaskHandle};

/// Identifies one armed autoplay task of one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoplayToken(pub u64);

/// Cancelable handle to a repeating task
pub trait TaskHandle {
    /// Stop the task; further ticks must not be delivered
    fn cancel(&mut self);
}

/// Source of repeating timer tasks
pub trait Scheduler {
    type Handle: TaskHandle;

    /// Arm a task that delivers `token` every `period`, first after one period
    fn schedule_repeating(&mut self, period: Duration, token: AutoplayToken) -> Self::Handle;
}

/// Scheduler for sliders without autoplay
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

/// Handle returned by [`NoopScheduler`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandle;

impl TaskHandle for NoopHandle {
    fn cancel(&mut self) {}
}

impl Scheduler for NoopScheduler {
    type Handle = NoopHandle;

    fn schedule_repeating(&mut self, period: Duration, token: AutoplayToken) -> NoopHandle {
        tracing::debug!(
            period_ms = period.as_millis(),
            token = token.0,
            "Autoplay requested on a slider without a scheduler"
        );
        NoopHandle
    }
}
