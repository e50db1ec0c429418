//! # collapsible-tabs
//!
//! Headless scroll synchronization for a collapsible header above a set of
//! tabbed, independently scrollable lists.
//!
//! One shared collapse value drives the header. Only the active tab's list
//! may write it; inactive lists are realigned when the user switches tabs.
//! Pull-to-refresh and snap-after-release run as small state machines on
//! top of a timing animator. Rendering is left to the host: lists are driven
//! through the [`ScrollableView`] trait and the header reads
//! [`TabView::header_layout`] or subscribes to the collapse value.
//!
//! ## Core Systems
//!
//! - **[`container`]**: [`TabView`], the gesture container owning every scene
//! - **[`scene`]**: per-tab controllers, refresh and snap state machines, layout math
//! - **[`context`]**: shared collapse value, active tab, gating flags
//! - **[`reactive`]**: watch-backed shared values and the ordered notification queue
//! - **[`animation`]**: easing, timing, and the per-target animation arena
//! - **[`event`]**: broadcast bus and the imperative [`TabViewHandle`]
//! - **[`driver`]**: async frame loop on a tokio interval
//! - **[`config`]**: [`CollapseConfig`] with builder methods and TOML loading
//! - **[`testing`]**: headless Pilot and recording views

// Foundation
pub mod config;
pub mod error;

// Shared state and timing
pub mod animation;
pub mod context;
pub mod reactive;

// Scenes and their container
pub mod container;
pub mod scene;

// Outer surfaces
pub mod driver;
pub mod event;

// Test harness
pub mod testing;

pub use config::CollapseConfig;
pub use container::TabView;
pub use context::{HeaderLayout, SharedContext};
pub use driver::FrameDriver;
pub use error::{Error, Result};
pub use event::{BusEvent, ComponentId, EventBus, OffsetParams, ScrollParams, TabViewHandle};
pub use scene::{PullOutcome, RefreshPhase, SceneProps, ScrollableView};
