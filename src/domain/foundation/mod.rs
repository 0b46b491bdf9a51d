//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the local clock, error types and the state machine
//! trait that form the vocabulary of the relay.

mod clock;
mod errors;
mod ids;
mod state_machine;

pub use clock::{Clock, FixedClock, SystemClock, DATE_FORMAT, TIME_FORMAT};
pub use errors::{ErrorCode, ValidationError};
pub use ids::{ConnectionId, TokenId};
pub use state_machine::StateMachine;
