//! Utilities shared by the CoDraw server and client.

pub mod logger;
pub mod time;
