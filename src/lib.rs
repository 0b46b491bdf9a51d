//! Fishroom relay - chat message distribution and retrieval.
//!
//! Messages from every front-end are published to one ingress channel,
//! archived per room per day, and redistributed as a paginated history,
//! a live websocket stream and credentialed long-poll queues.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
