//! Cross-component event bus.
//!
//! Imperative commands and tab chrome notifications travel as [`BusEvent`]s
//! over a tokio broadcast channel. Every event carries the [`ComponentId`] of
//! the tab view it targets; tab views drop events addressed to others.

use std::fmt;

use tokio::sync::broadcast;
use tracing::debug;

use super::command::{OffsetParams, ScrollParams};

/// Default channel capacity. Receivers that fall further behind lose events.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// ComponentId
// ---------------------------------------------------------------------------

/// Identifies one tab view instance on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// BusEvent
// ---------------------------------------------------------------------------

/// Why scroll input should be ignored or restored around a tab transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreScrollKind {
    /// A tab was pressed; an animated page change follows.
    TabPressed,
    /// The user started swiping between pages.
    SwipeStart,
    /// The swipe ended.
    SwipeEnd,
}

/// An event addressed to one tab view.
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    IgnoreScrollEnable {
        component_id: ComponentId,
        kind: IgnoreScrollKind,
    },
    ScrollToTop {
        component_id: ComponentId,
        params: ScrollParams,
    },
    ScrollToOffset {
        component_id: ComponentId,
        params: OffsetParams,
    },
    ScrollToTabBar {
        component_id: ComponentId,
        params: ScrollParams,
    },
}

impl BusEvent {
    /// The tab view this event targets.
    pub fn component_id(&self) -> &ComponentId {
        match self {
            BusEvent::IgnoreScrollEnable { component_id, .. }
            | BusEvent::ScrollToTop { component_id, .. }
            | BusEvent::ScrollToOffset { component_id, .. }
            | BusEvent::ScrollToTabBar { component_id, .. } => component_id,
        }
    }

    /// Stable event name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BusEvent::IgnoreScrollEnable { kind, .. } => match kind {
                IgnoreScrollKind::TabPressed => "tab-pressed-ignore-scroll",
                IgnoreScrollKind::SwipeStart => "swipe-start-ignore-scroll",
                IgnoreScrollKind::SwipeEnd => "swipe-end-restore-scroll",
            },
            BusEvent::ScrollToTop { .. } => "scroll-to-top",
            BusEvent::ScrollToOffset { .. } => "scroll-to-offset",
            BusEvent::ScrollToTabBar { .. } => "scroll-to-tab-bar",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Broadcast sender shared by every handle and tab view of an app.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<BusEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    /// Bus with a custom capacity. Zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Returns how many receivers got it.
    pub fn emit(&self, event: BusEvent) -> usize {
        let name = event.name();
        let component = event.component_id().clone();
        match self.tx.send(event) {
            Ok(receivers) => {
                debug!(event = name, %component, receivers, "bus event emitted");
                receivers
            }
            Err(_) => {
                debug!(event = name, %component, "bus event dropped: no subscribers");
                0
            }
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
