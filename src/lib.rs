//! Bricks (workspace facade crate).
//!
//! Re-exports the member crates under `bricks::{core,engine,input,types}` and
//! hosts the headless [`runner`] used by the default binary.

pub use bricks_core as core;
pub use bricks_engine as engine;
pub use bricks_input as input;
pub use bricks_types as types;

pub mod runner;
