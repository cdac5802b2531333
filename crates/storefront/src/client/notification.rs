//! Transient confirmation message with a debounced auto-hide.

use chrono::{DateTime, Duration, Utc};

/// How long a notification stays visible, in milliseconds.
pub const NOTIFICATION_TTL_MS: i64 = 1800;

fn ttl() -> Duration {
    Duration::milliseconds(NOTIFICATION_TTL_MS)
}

/// The single on-screen notification.
///
/// Showing a new message replaces the pending hide deadline, so only the
/// latest message's timer is ever live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    message: Option<String>,
    hide_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// The visible message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether a message is showing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Show `message` for `NOTIFICATION_TTL_MS`.
    pub fn show(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.message = Some(message.into());
        self.hide_at = Some(now + ttl());
    }

    /// Hide the message once its deadline has passed.
    ///
    /// Returns `true` if the message was hidden by this call. The text is
    /// kept so a fade-out can still display it.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_000_000, 0).single().unwrap_or_default()
    }

    #[test]
    fn test_hides_after_ttl() {
        let mut notification = Notification::default();
        notification.show("Añadido: Gorra", t0());

        assert!(!notification.expire(t0() + Duration::milliseconds(1799)));
        assert!(notification.is_visible());
        assert!(notification.expire(t0() + ttl()));
        assert!(!notification.is_visible());
        assert!(!notification.expire(t0() + Duration::seconds(10)));
    }

    #[test]
    fn test_new_message_resets_timer() {
        let mut notification = Notification::default();
        notification.show("Añadido: Gorra", t0());
        notification.show("Añadido: Mochila", t0() + Duration::milliseconds(1000));

        // The first deadline has passed, but only the latest timer is live
        assert!(!notification.expire(t0() + Duration::milliseconds(1900)));
        assert_eq!(notification.message(), Some("Añadido: Mochila"));
        assert!(notification.expire(t0() + Duration::milliseconds(2800)));
    }
}
