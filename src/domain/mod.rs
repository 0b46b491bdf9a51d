//! Domain layer containing relay rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, clock, errors, state machine trait)
//! - `chat` - Message model, ingress validation, error taxonomy
//! - `chatlog` - Partitions, windowing, retention and room access
//! - `relay` - Bus channels, bus events, live connection lifecycle

pub mod chat;
pub mod chatlog;
pub mod foundation;
pub mod relay;
