//! Toast notifications.
//!
//! DESIGN
//! ======
//! Every user-visible outcome (action completed, form rejected, sync done)
//! is a one-shot toast. The `Notifier` queues them in memory; reading the
//! feed drains it, so each toast is delivered exactly once. The queue is
//! bounded and drops the oldest toast when full.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use uuid::Uuid;

use crate::clock;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: Variant,
    pub created_at: String,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
            created_at: clock::timestamp(),
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { variant: Variant::Destructive, ..Self::new(title, description) }
    }
}

#[derive(Clone)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { queue: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))), capacity: capacity.max(1) }
    }

    pub fn push(&self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            variant = ?notification.variant,
            "notification"
        );
        let mut queue = self.queue.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if queue.len() >= self.capacity {
            queue.pop_front();
        }
        queue.push_back(notification);
    }

    /// Take every pending toast, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.queue.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        queue.drain(..).collect()
    }

    #[cfg(test)]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
