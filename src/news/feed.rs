//! Bounded, newest-first headline list

use super::NewsEvent;
use std::collections::VecDeque;

/// Default number of headlines kept
pub const DEFAULT_FEED_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct NewsFeed {
    events: VecDeque<NewsEvent>,
    capacity: usize,
}

impl NewsFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an event, dropping the oldest beyond capacity
    pub fn push(&mut self, event: NewsEvent) {
        self.events.push_front(event);
        self.events.truncate(self.capacity);
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &NewsEvent> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&NewsEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for NewsFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}
