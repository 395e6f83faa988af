//! Transient user-facing notices
//!
//! Recoverable failures surface here instead of as errors. Each notice stays
//! visible for a fixed TTL.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default notice lifetime in seconds
pub const DEFAULT_NOTICE_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Holds notices until they expire
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            notices: Vec::new(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::seconds(5)),
        }
    }

    pub fn raise(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.raise_at(level, message, Utc::now());
    }

    /// Raise a notice at `at`.
    ///
    /// Expired notices are dropped first. Repeating a visible notice refreshes
    /// it instead of stacking a copy, so the board stays bounded.
    pub fn raise_at(&mut self, level: NoticeLevel, message: impl Into<String>, at: DateTime<Utc>) {
        let message = message.into();
        match level {
            NoticeLevel::Info => tracing::info!(%message, "Notice"),
            NoticeLevel::Warning => tracing::warn!(%message, "Notice"),
            NoticeLevel::Error => tracing::error!(%message, "Notice"),
        }

        self.prune(at);
        if let Some(pos) = self
            .notices
            .iter()
            .position(|n| n.level == level && n.message == message)
        {
            self.notices.remove(pos);
        }
        self.notices.push(Notice {
            level,
            message,
            raised_at: at,
        });
    }

    /// Notices still visible at `now`, oldest first
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        let ttl = self.ttl;
        self.notices
            .iter()
            .filter(move |n| now - n.raised_at < ttl)
    }

    /// Drop expired notices
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.notices.retain(|n| now - n.raised_at < ttl);
    }

    /// Every notice raised and not yet pruned
    pub fn all(&self) -> &[Notice] {
        &self.notices
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(DEFAULT_NOTICE_TTL_SECS))
    }
}
