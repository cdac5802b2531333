//! "Deal ends in" countdown shown in the hero banner.

use chrono::{DateTime, Duration, Utc};

/// Length of the deal window from page load.
fn deal_window() -> Duration {
    Duration::hours(5) + Duration::minutes(23)
}

/// A countdown to a fixed deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    deadline: DateTime<Utc>,
}

impl Countdown {
    /// Start the deal window at `now`.
    #[must_use]
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            deadline: now + deal_window(),
        }
    }

    /// Time left, never negative.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }

    /// Time left as `HH:MM:SS`.
    #[must_use]
    pub fn display(&self, now: DateTime<Utc>) -> String {
        let seconds = self.remaining(now).num_seconds();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_767_000_000, 0).unwrap_or_default()
    }

    #[test]
    fn test_starts_at_five_hours_twenty_three() {
        let countdown = Countdown::start(t0());
        assert_eq!(countdown.display(t0()), "05:23:00");
    }

    #[test]
    fn test_counts_down() {
        let countdown = Countdown::start(t0());
        let later = t0() + Duration::hours(2) + Duration::seconds(1);
        assert_eq!(countdown.display(later), "03:22:59");
    }

    #[test]
    fn test_partial_seconds_round_down() {
        let countdown = Countdown::start(t0());
        let later = t0() + Duration::milliseconds(1500);
        assert_eq!(countdown.display(later), "05:22:58");
    }

    #[test]
    fn test_clamps_at_zero() {
        let countdown = Countdown::start(t0());
        let later = t0() + Duration::hours(6);
        assert_eq!(countdown.remaining(later), Duration::zero());
        assert_eq!(countdown.display(later), "00:00:00");
    }
}
