//! Utilities shared by the ElderScape chat server and client.

pub mod logger;
pub mod time;
