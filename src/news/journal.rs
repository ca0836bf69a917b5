//! Bounded, most-recent-first news journal

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;
use crate::news::NewsEvent;

/// Default number of retained items
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsJournal {
    /// Index 0 is the newest item
    entries: VecDeque<NewsEvent>,
    capacity: usize,
    next_seq: u64,
    turn: Turn,
    year: u32,
}

impl NewsJournal {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_seq: 1,
            turn: 0,
            year: 0,
        }
    }

    /// Set the turn/year stamped onto subsequently published items
    pub fn set_date(&mut self, turn: Turn, year: u32) {
        self.turn = turn;
        self.year = year;
    }

    /// Publish an item at the front, evicting the oldest past capacity.
    /// Returns the assigned sequence number.
    pub fn publish(&mut self, mut event: NewsEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        event.seq = seq;
        event.turn = self.turn;
        event.year = self.year;

        self.entries.push_front(event);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
        seq
    }

    /// Up to `n` most recent items, newest first
    pub fn latest(&self, n: usize) -> Vec<&NewsEvent> {
        self.entries.iter().take(n).collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &NewsEvent> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&NewsEvent> {
        self.entries.front()
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

    /// Total number of items ever published
    pub fn published(&self) -> u64 {
        self.next_seq - 1
    }
}

impl Default for NewsJournal {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
