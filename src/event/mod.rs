//! Event plumbing between tab views and the outside world.
//!
//! - [`bus`]: broadcast bus and the events it carries
//! - [`command`]: imperative handle that emits scroll commands

pub mod bus;
pub mod command;

pub use bus::{BusEvent, ComponentId, EventBus, IgnoreScrollKind, DEFAULT_BUS_CAPACITY};
pub use command::{OffsetParams, ScrollParams, TabViewHandle};
