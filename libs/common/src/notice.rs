//! Inline status messages shown by the controllers

use std::time::{Duration, Instant};

use crate::error::GalleryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A success or error message, optionally hidden after a delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// `None` keeps the message until it is replaced or cleared
    pub hide_after: Option<Duration>,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
            hide_after: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
            hide_after: None,
        }
    }

    /// Error notice carrying the operation's error message
    pub fn from_error(err: &GalleryError) -> Self {
        Notice::error(err.to_string())
    }

    pub fn hide_after(mut self, delay: Duration) -> Self {
        self.hide_after = Some(delay);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// Whether a notice shown at `shown_at` should be hidden by `now`
    pub fn is_expired(&self, shown_at: Instant, now: Instant) -> bool {
        match self.hide_after {
            Some(delay) => now.saturating_duration_since(shown_at) >= delay,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let shown = Instant::now();
        let notice = Notice::success("Saved").hide_after(Duration::from_secs(5));

        assert!(!notice.is_expired(shown, shown + Duration::from_secs(4)));
        assert!(notice.is_expired(shown, shown + Duration::from_secs(5)));
    }

    #[test]
    fn test_sticky_notice_never_expires() {
        let shown = Instant::now();
        let notice = Notice::error("Nope");
        assert!(notice.is_error());
        assert!(!notice.is_expired(shown, shown + Duration::from_secs(3600)));
    }
}
