//! Live connection lifecycle.
//!
//! ```text
//! Connecting ──join──▶ Subscribed(room) ──join──▶ Subscribed(room')
//!     │                     │
//!     └──────── close ──────┴──▶ Closed
//! ```

use crate::domain::foundation::StateMachine;

/// Phase of a live stream connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Connecting,
    Subscribed,
    Closed,
}

impl StateMachine for ConnectionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionPhase::*;
        matches!(
            (self, target),
            (Connecting, Subscribed)
                | (Connecting, Closed)
                | (Subscribed, Subscribed)
                | (Subscribed, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionPhase::*;
        match self {
            Connecting => vec![Subscribed, Closed],
            Subscribed => vec![Subscribed, Closed],
            Closed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConnectionPhase::*;

    #[test]
    fn join_moves_connecting_to_subscribed() {
        assert_eq!(Connecting.transition_to(Subscribed), Ok(Subscribed));
    }

    #[test]
    fn rejoin_stays_subscribed() {
        assert_eq!(Subscribed.transition_to(Subscribed), Ok(Subscribed));
    }

    #[test]
    fn failed_setup_goes_straight_to_closed() {
        assert_eq!(Connecting.transition_to(Closed), Ok(Closed));
    }

    #[test]
    fn closed_is_terminal() {
        assert!(Closed.is_terminal());
        assert!(Closed.transition_to(Subscribed).is_err());
        assert!(Closed.transition_to(Connecting).is_err());
    }

    #[test]
    fn cannot_return_to_connecting() {
        assert!(Subscribed.transition_to(Connecting).is_err());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for phase in [Connecting, Subscribed, Closed] {
            for target in phase.valid_transitions() {
                assert!(phase.can_transition_to(&target));
            }
        }
    }
}
