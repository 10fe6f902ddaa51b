//! Explicit scheduled tasks.
//!
//! The host loop owns the clock: it calls `poll(now)` and gets back every task
//! that came due since the last poll. Nothing here spawns threads or sleeps,
//! which keeps the whole dashboard on one logical thread and lets tests drive
//! time with plain `Instant` arithmetic.

use std::time::{Duration, Instant};

/// Smallest accepted period for repeating tasks.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies one scheduled task; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Every(Duration),
    Once,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    task: T,
    due: Instant,
    cadence: Cadence,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` every `period`, first at `now + period`.
    pub fn every(&mut self, now: Instant, period: Duration, task: T) -> TaskHandle {
        let period = period.max(MIN_PERIOD);
        self.push(task, now + period, Cadence::Every(period))
    }

    /// Run `task` once at `now + delay`.
    pub fn once(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        self.push(task, now + delay, Cadence::Once)
    }

    fn push(&mut self, task: T, due: Instant, cadence: Cadence) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            due,
            cadence,
        });
        handle
    }

    /// Cancel one task. Returns `false` if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel every task; returns how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Collect every firing due at or before `now`, in due-time order.
    ///
    /// A repeating task that missed several periods fires once per elapsed
    /// period and re-arms from its schedule, not from `now`. One-shot tasks are
    /// removed once they fire.
    pub fn poll(&mut self, now: Instant) -> Vec<(TaskHandle, T)> {
        let mut fired: Vec<(Instant, TaskHandle, T)> = Vec::new();

        for entry in &mut self.entries {
            match entry.cadence {
                Cadence::Once => {
                    if entry.due <= now {
                        fired.push((entry.due, entry.handle, entry.task.clone()));
                    }
                }
                Cadence::Every(period) => {
                    while entry.due <= now {
                        fired.push((entry.due, entry.handle, entry.task.clone()));
                        entry.due += period;
                    }
                }
            }
        }

        self.entries
            .retain(|e| !(e.cadence == Cadence::Once && e.due <= now));

        fired.sort_by_key(|(due, handle, _)| (*due, *handle));
        fired.into_iter().map(|(_, handle, task)| (handle, task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Job {
        Tick,
        Metrics,
        Done,
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn periodic_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.every(t0, secs(30), Job::Tick);

        assert!(s.poll(t0 + secs(29)).is_empty());
        assert_eq!(s.poll(t0 + secs(30)).len(), 1);
        assert!(s.poll(t0 + secs(31)).is_empty());

        // Missed two intervals: fires twice, then re-arms at t0 + 90s.
        let fired = s.poll(t0 + secs(89));
        assert_eq!(fired.len(), 1);
        let fired = s.poll(t0 + secs(150));
        assert_eq!(fired.len(), 3);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn one_shot_fires_once_and_is_removed() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let handle = s.once(t0, Duration::from_millis(2000), Job::Done);

        assert!(s.poll(t0 + secs(1)).is_empty());
        assert!(s.is_scheduled(handle));
        assert_eq!(s.poll(t0 + secs(2)), vec![(handle, Job::Done)]);
        assert!(!s.is_scheduled(handle));
        assert!(s.poll(t0 + secs(10)).is_empty());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let tick = s.every(t0, secs(30), Job::Tick);
        let metrics = s.every(t0, secs(10), Job::Metrics);

        assert!(s.cancel(tick));
        assert!(!s.cancel(tick));

        let fired = s.poll(t0 + secs(60));
        assert!(fired.iter().all(|(h, _)| *h == metrics));
        assert_eq!(fired.len(), 6);

        assert_eq!(s.cancel_all(), 1);
        assert!(s.poll(t0 + secs(600)).is_empty());
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn firings_come_back_in_due_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.every(t0, secs(30), Job::Tick);
        s.every(t0, secs(10), Job::Metrics);
        s.once(t0, secs(15), Job::Done);

        let jobs: Vec<Job> = s.poll(t0 + secs(30)).into_iter().map(|(_, j)| j).collect();
        assert_eq!(
            jobs,
            vec![Job::Metrics, Job::Done, Job::Metrics, Job::Tick, Job::Metrics]
        );
    }

    #[test]
    fn zero_period_is_bumped() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.every(t0, Duration::ZERO, Job::Tick);
        assert_eq!(s.poll(t0 + Duration::from_millis(3)).len(), 3);
    }
}
