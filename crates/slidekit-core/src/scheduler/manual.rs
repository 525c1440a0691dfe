use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::{AutoplayToken, Scheduler, TaskHandle};

/// A task armed through [`ManualScheduler`]
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub period: Duration,
    pub token: AutoplayToken,
    cancelled: Rc<Cell<bool>>,
}

impl ScheduledTask {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Scheduler driven by hand: it only records what was armed.
///
/// The host fires ticks itself by passing [`ManualScheduler::live_token`]
/// to the controller. Used for headless sessions and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    tasks: Vec<ScheduledTask>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every task ever armed, including cancelled ones
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Tasks that have not been cancelled
    pub fn live_tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().filter(|t| !t.is_cancelled())
    }

    /// Token of the most recent live task
    pub fn live_token(&self) -> Option<AutoplayToken> {
        self.live_tasks().last().map(|t| t.token)
    }

    pub fn started(&self) -> usize {
        self.tasks.len()
    }

    pub fn cancelled(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_cancelled()).count()
    }
}

/// Handle returned by [`ManualScheduler`]
#[derive(Debug)]
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle for ManualHandle {
    fn cancel(&mut self) {
        self.cancelled.set(true);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_repeating(&mut self, period: Duration, token: AutoplayToken) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.push(ScheduledTask {
            period,
            token,
            cancelled: Rc::clone(&cancelled),
        });
        ManualHandle { cancelled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_marks_task() {
        let mut scheduler = ManualScheduler::new();
        let mut first = scheduler.schedule_repeating(Duration::from_secs(5), AutoplayToken(1));
        let _second = scheduler.schedule_repeating(Duration::from_secs(5), AutoplayToken(2));

        first.cancel();

        assert_eq!(scheduler.started(), 2);
        assert_eq!(scheduler.cancelled(), 1);
        assert_eq!(scheduler.live_token(), Some(AutoplayToken(2)));
    }
}
