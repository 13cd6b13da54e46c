//! Terminal input mapping.
//!
//! Maps `crossterm` key events onto the discrete [`types::Intent`]s the
//! session understands. Nothing here touches game state.

pub mod map;

pub use bricks_types as types;

pub use map::{handle_key_event, should_quit};
