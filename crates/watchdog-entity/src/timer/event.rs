//! Lifecycle events that produce a user notification.

use super::state::TimerState;

/// A timer transition the owner is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// Timer was created.
    Created,
    /// A new or running timer was kicked.
    Kicked,
    /// An expired timer was kicked back to running.
    ExpiredKicked,
    /// The scanner observed the timer past its expiry.
    Expired,
    /// Timer was deleted.
    Deleted,
}

impl TimerEvent {
    /// Event for a kick, chosen from the state the timer was in before it.
    pub fn for_kick(prior: TimerState) -> Self {
        match prior {
            TimerState::New | TimerState::Running => Self::Kicked,
            TimerState::Expired => Self::ExpiredKicked,
        }
    }

    /// Notification text for a timer named `name`.
    pub fn message(&self, name: &str) -> String {
        match self {
            Self::Created => format!("Timer '{name}' created"),
            Self::Kicked => format!("Timer '{name}' kicked"),
            Self::ExpiredKicked => format!("Expired timer '{name}' kicked"),
            Self::Expired => format!("Timer '{name}' has expired"),
            Self::Deleted => format!("Timer '{name}' deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_event_depends_on_prior_state() {
        assert_eq!(TimerEvent::for_kick(TimerState::New), TimerEvent::Kicked);
        assert_eq!(TimerEvent::for_kick(TimerState::Running), TimerEvent::Kicked);
        assert_eq!(
            TimerEvent::for_kick(TimerState::Expired),
            TimerEvent::ExpiredKicked
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(TimerEvent::Created.message("Test1"), "Timer 'Test1' created");
        assert_eq!(
            TimerEvent::ExpiredKicked.message("Test1"),
            "Expired timer 'Test1' kicked"
        );
        assert_eq!(TimerEvent::Expired.message("Test1"), "Timer 'Test1' has expired");
        assert_eq!(TimerEvent::Deleted.message("Test1"), "Timer 'Test1' deleted");
    }
}
