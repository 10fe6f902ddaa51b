//! Capped, newest-first events feed.

use std::collections::VecDeque;

use crate::domain::Event;

/// Default number of events the feed keeps.
pub const DEFAULT_EVENT_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventLog {
    /// A capacity of zero is bumped to one so the newest event is always visible.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Build a log from events given newest-first, keeping at most `capacity`.
    pub fn seeded(events: impl IntoIterator<Item = Event>, capacity: usize) -> Self {
        let mut log = Self::with_capacity(capacity);
        log.entries.extend(events);
        log.entries.truncate(log.capacity);
        log
    }

    /// Prepend `event`; the oldest entry is evicted once the log is over capacity.
    pub fn insert(&mut self, event: Event) {
        self.entries.push_front(event);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Events newest-first.
    pub fn all(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Impact;

    fn event(n: usize) -> Event {
        Event::new(format!("{n}m ago"), format!("event {n}"), Impact::Neutral, "")
    }

    #[test]
    fn insert_prepends() {
        let mut log = EventLog::default();
        log.insert(event(1));
        log.insert(event(2));
        let titles: Vec<&str> = log.all().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["event 2", "event 1"]);
    }

    #[test]
    fn eleventh_insert_evicts_the_oldest() {
        let mut log = EventLog::default();
        for n in 1..=11 {
            log.insert(event(n));
            assert!(log.len() <= 10);
        }
        assert_eq!(log.len(), 10);
        assert!(log.all().all(|e| e.title != "event 1"));

        let titles: Vec<String> = log.all().map(|e| e.title.clone()).collect();
        let expected: Vec<String> = (2..=11).rev().map(|n| format!("event {n}")).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn seeded_log_truncates_to_capacity() {
        let log = EventLog::seeded((1..=5).map(event), 3);
        assert_eq!(log.len(), 3);
        assert_eq!(log.all().next().map(|e| e.title.as_str()), Some("event 1"));
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let mut log = EventLog::with_capacity(0);
        log.insert(event(1));
        log.insert(event(2));
        assert_eq!(log.len(), 1);
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.all().next().map(|e| e.title.as_str()), Some("event 2"));
    }
}
