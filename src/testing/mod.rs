//! Headless testing harness: recording views, a Pilot, and state dumps.
//!
//! Use the [`Pilot`] to drive a [`TabView`](crate::container::TabView) with
//! [`RecordingView`]s standing in for host lists. Use [`render_state`] to
//! capture the synchronization state as text for snapshot assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{Pilot, RecordingView, ViewCall};
pub use snapshot::render_state;
