//! Frame scheduling.
//!
//! A [`Scheduler`] invokes registered tasks once per frame until they report
//! [`TaskStatus::Done`] or are cancelled. Two implementations:
//!
//! - [`ManualScheduler`]: frames are advanced explicitly (tests, headless runs)
//! - [`IntervalScheduler`]: frames are paced by a fixed wall-clock interval
//!
//! Everything is single-threaded; tasks share state through `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::core::RandomSource;
use crate::engine::Engine;
use crate::surface::Surface;

/// Identifies a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Returned by a task after each invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Invoke again next frame
    Continue,
    /// Remove the task; it is never invoked again
    Done,
}

/// A per-frame callback
pub type Task = Box<dyn FnMut() -> TaskStatus>;

pub trait Scheduler {
    /// Register a task to run every frame
    fn schedule(&mut self, task: Task) -> TaskHandle;

    /// Remove a task. Returns false if it was already gone.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
}

/// Scheduler whose frames are advanced by the caller.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: u64,
    tasks: Vec<(TaskHandle, Task)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every live task once. Returns the number of tasks invoked.
    pub fn run_frame(&mut self) -> usize {
        let mut ran = 0;
        self.tasks.retain_mut(|(_, task)| {
            ran += 1;
            task() == TaskStatus::Continue
        });
        ran
    }

    /// Number of live tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tasks.push((handle, task));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.tasks.iter().position(|(h, _)| *h == handle) {
            Some(idx) => {
                self.tasks.remove(idx);
                true
            }
            None => false,
        }
    }
}

/// Scheduler that runs a frame whenever `interval` has elapsed.
///
/// Call [`IntervalScheduler::poll`] from the host loop; use
/// [`IntervalScheduler::time_until_next_frame`] as the input-poll timeout.
pub struct IntervalScheduler {
    interval: Duration,
    last_frame: Instant,
    inner: ManualScheduler,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: Instant::now(),
            inner: ManualScheduler::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next frame is due (zero when overdue)
    pub fn time_until_next_frame(&self) -> Duration {
        self.interval
            .checked_sub(self.last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0))
    }

    /// Run a frame if one is due. Returns the number of tasks invoked.
    pub fn poll(&mut self) -> usize {
        if self.last_frame.elapsed() < self.interval {
            return 0;
        }
        self.last_frame = Instant::now();
        self.inner.run_frame()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.is_idle()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, task: Task) -> TaskHandle {
        self.inner.schedule(task)
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.inner.cancel(handle)
    }
}

/// Build the per-frame task for a shared engine and surface.
///
/// Each invocation steps the engine and draws into the surface. The task
/// finishes on the frame that renders the game-over state.
pub fn frame_task<R, S>(engine: Rc<RefCell<Engine<R>>>, surface: Rc<RefCell<S>>) -> Task
where
    R: RandomSource + 'static,
    S: Surface + 'static,
{
    Box::new(move || {
        let mut engine = engine.borrow_mut();
        engine.step(&mut *surface.borrow_mut());
        if engine.is_game_over() {
            TaskStatus::Done
        } else {
            TaskStatus::Continue
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn manual_scheduler_runs_every_task_once_per_frame() {
        let hits = Rc::new(Cell::new(0));
        let mut sched = ManualScheduler::new();
        for _ in 0..2 {
            let hits = Rc::clone(&hits);
            sched.schedule(Box::new(move || {
                hits.set(hits.get() + 1);
                TaskStatus::Continue
            }));
        }

        assert_eq!(sched.run_frame(), 2);
        assert_eq!(sched.run_frame(), 2);
        assert_eq!(hits.get(), 4);
    }

    #[test]
    fn done_tasks_are_dropped() {
        let mut sched = ManualScheduler::new();
        sched.schedule(Box::new(|| TaskStatus::Done));
        assert_eq!(sched.run_frame(), 1);
        assert!(sched.is_idle());
        assert_eq!(sched.run_frame(), 0);
    }

    #[test]
    fn cancel_removes_only_the_named_task() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule(Box::new(|| TaskStatus::Continue));
        let _b = sched.schedule(Box::new(|| TaskStatus::Continue));

        assert!(sched.cancel(a));
        assert!(!sched.cancel(a));
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn interval_scheduler_waits_for_interval() {
        let mut sched = IntervalScheduler::new(Duration::from_secs(3600));
        sched.schedule(Box::new(|| TaskStatus::Continue));
        assert_eq!(sched.poll(), 0);
        assert!(sched.time_until_next_frame() > Duration::from_secs(0));
    }

    #[test]
    fn interval_scheduler_zero_interval_always_due() {
        let mut sched = IntervalScheduler::new(Duration::from_secs(0));
        sched.schedule(Box::new(|| TaskStatus::Continue));
        assert_eq!(sched.time_until_next_frame(), Duration::from_secs(0));
        assert_eq!(sched.poll(), 1);
    }
}
