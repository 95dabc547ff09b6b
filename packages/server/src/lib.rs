//! Global game chat relay for ElderScape.
//!
//! A room accepts WebSocket connections, keeps a bounded rolling history of
//! chat messages and broadcasts every incoming message to all connected
//! members, dropping members whose connection has failed.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
