//! Scene controllers: one per tab, each wrapping a host scrollable list.
//!
//! - [`controller`]: scroll gating, publishing, and command handling
//! - [`refresh`]: pull-to-refresh state machine
//! - [`snap`]: snap-after-release decisions
//! - [`layout`]: spacer and sticky header math
//! - [`view`]: the host view boundary and scene props
//! - [`registry`]: mounted scenes by index

pub mod controller;
pub mod layout;
pub mod refresh;
pub mod registry;
pub mod snap;
pub mod view;

pub use controller::{SceneController, SceneCx};
pub use layout::{ListProps, SceneMeasurements};
pub use refresh::{PullOutcome, RefreshPhase, RefreshState};
pub use registry::SceneRegistry;
pub use snap::{snap_destination, SnapGuard};
pub use view::{PropWarning, RefreshCallback, SceneProps, ScrollableView, SCROLL_EVENT_THROTTLE};
