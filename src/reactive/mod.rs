//! Reactive state: observable shared values and the ordered reaction queue.

pub mod reactor;
pub mod value;

pub use reactor::{Notification, Reactor, MAX_FLUSH_ROUNDS};
pub use value::SharedValue;
