//! Terminal client for the collaborative whiteboard.
//!
//! Mirrors a room's action history locally, renders it through a [`canvas::Renderer`]
//! and turns pointer-style commands into wire events.

pub mod canvas;
pub mod command;
pub mod config;
pub mod error;
pub mod formatter;
pub mod input;
pub mod runner;
pub mod session;
pub mod view;
pub mod whiteboard;

pub use config::ClientConfig;
pub use error::ClientError;
pub use runner::run_client;
