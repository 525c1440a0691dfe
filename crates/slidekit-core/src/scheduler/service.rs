use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{AutoplayToken, Scheduler, TaskHandle};

/// Which slider an autoplay tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliderId(pub usize);

/// Tick sent by a [`TokioScheduler`] task to the UI loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayTick {
    pub slider: SliderId,
    pub token: AutoplayToken,
}

/// Scheduler backed by tokio interval tasks.
///
/// Ticks are not applied directly; they are sent over an unbounded channel
/// so the UI loop applies them on its own thread, in order with user input.
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    slider: SliderId,
    event_tx: mpsc::UnboundedSender<AutoplayTick>,
}

impl TokioScheduler {
    pub fn new(slider: SliderId, event_tx: mpsc::UnboundedSender<AutoplayTick>) -> Self {
        Self { slider, event_tx }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTaskHandle;

    fn schedule_repeating(&mut self, period: Duration, token: AutoplayToken) -> TokioTaskHandle {
        let slider = self.slider;
        let tx = self.event_tx.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Skip the first tick (fires immediately)
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(AutoplayTick { slider, token }).is_err() {
                    debug!(slider = slider.0, "Autoplay receiver dropped, stopping timer");
                    break;
                }
            }
        });

        debug!(
            slider = slider.0,
            token = token.0,
            period_ms = period.as_millis(),
            "Autoplay timer armed"
        );

        TokioTaskHandle {
            abort: Some(task.abort_handle()),
        }
    }
}

/// Handle to a spawned autoplay task; aborts the task on cancel or drop
#[derive(Debug)]
pub struct TokioTaskHandle {
    abort: Option<AbortHandle>,
}

impl TaskHandle for TokioTaskHandle {
    fn cancel(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

impl Drop for TokioTaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_after_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(SliderId(2), tx);

        let _handle = scheduler.schedule_repeating(Duration::from_millis(5000), AutoplayToken(7));

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(rx.try_recv().is_err());

        let tick = rx.recv().await.unwrap();
        assert_eq!(
            tick,
            AutoplayTick {
                slider: SliderId(2),
                token: AutoplayToken(7)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(SliderId(0), tx);

        let mut handle = scheduler.schedule_repeating(Duration::from_millis(100), AutoplayToken(1));
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(SliderId(0), tx);

        drop(scheduler.schedule_repeating(Duration::from_millis(100), AutoplayToken(1)));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }
}
