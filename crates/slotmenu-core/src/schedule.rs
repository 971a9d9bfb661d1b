//! Tick-based queue for deferred, single-shot tasks.
//!
//! Tasks are stored in a min-heap keyed by `(due_tick, insertion_order)`.
//! Earlier ticks run first; tasks due on the same tick run in the order
//! they were pushed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An entry in the task queue.
#[derive(Debug)]
struct Entry<T> {
    task: T,
    due: u64,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A queue of tasks waiting for a future tick.
///
/// The queue owns its own clock: [`advance`](Self::advance) moves it one
/// tick forward and hands back everything that became due.
pub struct TaskQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    now: u64,
    seq: u64,
}

impl<T> TaskQueue<T> {
    /// Create an empty queue at tick 0.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            now: 0,
            seq: 0,
        }
    }

    /// Schedule `task` to become due `delay` ticks from now. A zero delay is
    /// bumped to one tick.
    pub fn push(&mut self, task: T, delay: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            task,
            due: self.now + u64::from(delay.max(1)),
            seq,
        }));
    }

    /// Move the clock forward one tick and return every task now due, in
    /// run order.
    pub fn advance(&mut self) -> Vec<T> {
        self.now += 1;
        let mut due = Vec::new();
        while self
            .heap
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= self.now)
        {
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.task);
            }
        }
        due
    }

    /// The current tick.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Tick at which the next task becomes due, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every pending task. The clock is left untouched.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
