//! Session layer over the core simulation.
//!
//! - [`session`]: start/stop/pause/reset/intent/tick entry points
//! - [`tick`]: wall-clock and fixed-step tick sources
//! - [`custom_grid`]: parsing and normalizing externally supplied grids
//! - [`notify`]: channel and throttling event sinks

pub mod custom_grid;
pub mod notify;
pub mod session;
pub mod tick;

pub use custom_grid::{parse_grid, CustomGrid, CustomGridError, GridPolicy};
pub use notify::{ChannelSink, ThrottledSink};
pub use session::Session;
pub use tick::{FixedStep, TickSource, WallClock};
