//! Virtual-clock timer queue
//!
//! Stands in for `setTimeout`: work is scheduled against a monotonic
//! virtual clock and released when the owner advances time. Tests use it
//! as fake timers; the terminal preview advances it with wall-clock
//! ticks. Timers cannot be cancelled. Tasks targeting removed nodes are
//! expected to be no-ops when they fire.

use crate::dom::NodeId;
use crate::model::{ToastId, ToastKind};
use std::collections::BTreeMap;
use std::time::Duration;

/// Deferred work owned by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Remove a toast whose display duration elapsed
    ExpireToast(ToastId),
    /// Hide sidebar labels once the collapse fade finished
    HideSidebarLabels,
    /// Drop the transition style after a sidebar animation
    FinishSidebarAnimation,
    /// Run a debounced search if no newer input arrived
    RunSearch { input: NodeId, generation: u64 },
    /// Restore an icon after its press animation
    ReleaseIcon(NodeId),
    /// Restore a button after its press animation
    ReleaseButton(NodeId),
    /// Leave the loading state and report the outcome
    FinishButton {
        button: NodeId,
        message: String,
        kind: ToastKind,
    },
    /// Put back the background an interactive element flashed over
    RestoreBackground { node: NodeId, color: String },
    /// Follow-up toast of a simulated long-running action
    ShowToast { message: String, kind: ToastKind },
    /// Follow a navigation request (sign out redirect)
    Navigate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Ordered queue of pending tasks
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    /// Keyed by (deadline, id) so equal deadlines fire in schedule order
    pending: BTreeMap<(Duration, TimerId), TimerTask>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert((self.now + delay, id), task);
        id
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest task due at or before `deadline`
    ///
    /// The clock moves to the task's deadline so work it schedules is
    /// timed relative to when it fired.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerTask> {
        let (&(at, id), _) = self.pending.iter().next()?;
        if at > deadline {
            return None;
        }
        self.now = self.now.max(at);
        self.pending.remove(&(at, id))
    }

    /// Move the clock forward to `deadline` once every due task ran
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Advance by `by` and return every task that came due, in order
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTask> {
        let deadline = self.now + by;
        let mut due = Vec::new();
        while let Some(task) = self.pop_due(deadline) {
            due.push(task);
        }
        self.settle(deadline);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_deadline_order() {
        let mut timers = Scheduler::new();
        timers.schedule(Duration::from_millis(300), TimerTask::ExpireToast(ToastId(2)));
        timers.schedule(Duration::from_millis(100), TimerTask::HideSidebarLabels);
        timers.schedule(Duration::from_millis(300), TimerTask::ExpireToast(ToastId(3)));

        let due = timers.advance(Duration::from_millis(300));
        assert_eq!(
            due,
            vec![
                TimerTask::HideSidebarLabels,
                TimerTask::ExpireToast(ToastId(2)),
                TimerTask::ExpireToast(ToastId(3)),
            ]
        );
        assert!(timers.is_idle());
        assert_eq!(timers.now(), Duration::from_millis(300));
    }

    #[test]
    fn test_nothing_fires_early() {
        let mut timers = Scheduler::new();
        timers.schedule(Duration::from_millis(3000), TimerTask::ExpireToast(ToastId(1)));

        assert!(timers.advance(Duration::from_millis(2999)).is_empty());
        assert_eq!(timers.pending(), 1);
        assert_eq!(
            timers.advance(Duration::from_millis(1)),
            vec![TimerTask::ExpireToast(ToastId(1))]
        );
    }

    #[test]
    fn test_pop_due_moves_clock_to_deadline() {
        let mut timers = Scheduler::new();
        timers.schedule(Duration::from_millis(200), TimerTask::HideSidebarLabels);

        let task = timers.pop_due(Duration::from_millis(1000));
        assert_eq!(task, Some(TimerTask::HideSidebarLabels));
        assert_eq!(timers.now(), Duration::from_millis(200));

        // Work scheduled from inside a fired task is relative to its deadline
        timers.schedule(Duration::from_millis(100), TimerTask::FinishSidebarAnimation);
        assert!(timers.pop_due(Duration::from_millis(299)).is_none());
        assert!(timers.pop_due(Duration::from_millis(1000)).is_some());
    }
}
