// timeline.rs - Virtual-time event queue
//
// Every delayed effect in the sequence is an entry here. Entries fire in
// due order, ties in the order they were scheduled. Callers schedule
// follow-ups relative to the due time of the entry that produced them, so
// a late pump never shifts the rest of the sequence.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::config::Millis;

/// Groups entries so a whole stream can be cancelled at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lane {
    Prompt,
    Loading,
    LoadingMessages,
    Content,
    Typing,
}

#[derive(Debug)]
struct Entry<A> {
    due: Millis,
    seq: u64,
    lane: Lane,
    action: A,
}

impl<A> PartialEq for Entry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<A> Eq for Entry<A> {}

impl<A> PartialOrd for Entry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Entry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

pub struct Timeline<A> {
    queue: BinaryHeap<Reverse<Entry<A>>>,
    seq: u64,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self { queue: BinaryHeap::new(), seq: 0 }
    }

    pub fn schedule(&mut self, due: Millis, lane: Lane, action: A) {
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Reverse(Entry { due, seq, lane, action }));
    }

    /// Drop every pending entry on `lane`. Returns how many were dropped.
    pub fn cancel(&mut self, lane: Lane) -> usize {
        let before = self.queue.len();
        self.queue.retain(|Reverse(e)| e.lane != lane);
        before - self.queue.len()
    }

    /// Earliest entry due at or before `now`, with its due time.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, A)> {
        match self.queue.peek() {
            Some(Reverse(e)) if e.due <= now => {}
            _ => return None,
        }
        self.queue.pop().map(|Reverse(e)| (e.due, e.action))
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    #[cfg(test)]
    fn pending(&self, lane: Lane) -> usize {
        self.queue.iter().filter(|Reverse(e)| e.lane == lane).count()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
