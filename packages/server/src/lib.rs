//! Collaborative whiteboard room server.
//!
//! Relays drawing events between the members of a room and keeps each room's
//! action history so late joiners and undo / redo converge on the same canvas.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
