//! Notification window policy for discussion stars and replies.
//!
//! A star/reply on someone's discussion stays in their notification feed
//! while unvisualized, and for a grace period after being visualized.
//! The numeric badge is stricter: it counts unvisualized rows only. The
//! two predicates are deliberately different; both are pinned by tests.

use chrono::Duration;

use crate::types::Timestamp;

/// How long a visualized star/reply keeps appearing in the feed.
pub fn grace_window() -> Duration {
    Duration::days(2)
}

/// Feed membership: unvisualized, or visualized less than the grace
/// window ago (`updated_at` moves when the row is visualized).
pub fn in_notification_feed(visualized: bool, updated_at: Timestamp, now: Timestamp) -> bool {
    if !visualized {
        return true;
    }
    now.signed_duration_since(updated_at) < grace_window()
}

/// Badge membership: unvisualized rows only. The grace window never
/// extends the count.
pub fn in_notification_count(visualized: bool) -> bool {
    !visualized
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_unvisualized_always_in_feed_and_count() {
        let now = Utc::now();
        let old = now - Duration::days(30);
        assert!(in_notification_feed(false, old, now));
        assert!(in_notification_count(false));
    }

    #[test]
    fn test_grace_window_keeps_feed_but_not_count() {
        let now = Utc::now();
        let visualized_36h_ago = now - Duration::hours(36);
        assert!(in_notification_feed(true, visualized_36h_ago, now));
        assert!(!in_notification_count(true));
    }

    #[test]
    fn test_expired_grace_window_drops_from_feed() {
        let now = Utc::now();
        let visualized_3d_ago = now - Duration::days(3);
        assert!(!in_notification_feed(true, visualized_3d_ago, now));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let now = Utc::now();
        let exactly_2d_ago = now - grace_window();
        assert!(!in_notification_feed(true, exactly_2d_ago, now));
    }
}
