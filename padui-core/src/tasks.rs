//! Scheduling of delayed, cancellable background tasks.
//!
//! The menu schedules a single bounded retry when an asset is
//! registered-but-not-loaded at render time. Every scheduled task carries a
//! handle owned by the scheduling side, and dropping the handle cancels the
//! task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// An abstraction over a delayed-task scheduler.
pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay`, unless the returned handle is cancelled
    /// first.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle;
}

/// A handle to a scheduled task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Create the shared flags for a new task. Used by [Scheduler]
    /// implementations.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancel the task if it has not run yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the task was cancelled before running.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the task has already run.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Clone the cancellation flag for the task body.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Clone the completion flag for the task body.
    pub fn finish_flag(&self) -> Arc<AtomicBool> {
        self.finished.clone()
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A [Scheduler] running tasks on the smol executor.
#[derive(Default)]
pub struct SmolScheduler;

impl Scheduler for SmolScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
        let handle = TaskHandle::new();
        let cancelled = handle.cancel_flag();
        let finished = handle.finish_flag();

        smol::spawn(async move {
            smol::Timer::after(delay).await;

            if !cancelled.load(Ordering::SeqCst) {
                task();
            }
            finished.store(true, Ordering::SeqCst);
        })
        .detach();

        handle
    }
}

/// A [Scheduler] that runs nothing until told to. For headless tests and
/// hosts that pump their own timers.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<ScheduledTask>>,
}

struct ScheduledTask {
    delay: Duration,
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    task: Box<dyn FnOnce() + Send>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run (including cancelled ones).
    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Run every queued task that has not been cancelled, returning how many
    /// ran. The queued delay is ignored; the caller decides when "later" is.
    pub fn run_pending(&self) -> usize {
        let drained: Vec<ScheduledTask> = match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => return 0,
        };

        let mut ran = 0;
        for entry in drained {
            if !entry.cancelled.load(Ordering::SeqCst) {
                (entry.task)();
                ran += 1;
            }
            entry.finished.store(true, Ordering::SeqCst);
        }
        ran
    }

    /// The delay the most recently scheduled task asked for.
    pub fn last_delay(&self) -> Option<Duration> {
        self.queue.lock().ok()?.last().map(|t| t.delay)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
        let handle = TaskHandle::new();

        if let Ok(mut queue) = self.queue.lock() {
            queue.push(ScheduledTask {
                delay,
                cancelled: handle.cancel_flag(),
                finished: handle.finish_flag(),
                task,
            });
        }

        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_manual_scheduler_runs_once() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();

        let handle = scheduler.schedule(
            Duration::from_millis(500),
            Box::new(move || {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(handle.is_finished());
        assert_eq!(scheduler.run_pending(), 0);
    }

    #[test]
    fn test_cancelled_task_does_not_run() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();

        let handle = scheduler.schedule(
            Duration::from_millis(500),
            Box::new(move || {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
        );

        handle.cancel();
        assert_eq!(scheduler.run_pending(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();

        {
            let _handle = scheduler.schedule(
                Duration::from_millis(500),
                Box::new(move || {
                    counted.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        assert_eq!(scheduler.run_pending(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
