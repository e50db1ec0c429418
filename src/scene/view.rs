//! Collaborator boundary with the host's scrollable list component.
//!
//! The engine never renders. It drives the host view through
//! [`ScrollableView`] and receives native events through the tab view's
//! `on_*` entry points. [`SceneProps`] carries what the host declares for a
//! scene; props the engine must own are checked by [`SceneProps::verify`].

use std::fmt;

/// Throttle the engine requires for native scroll events, in milliseconds.
pub const SCROLL_EVENT_THROTTLE: u32 = 16;

// ---------------------------------------------------------------------------
// ScrollableView
// ---------------------------------------------------------------------------

/// Commands the engine issues to a host scroll view.
///
/// Scroll enabling is an explicit toggle: the host must apply it directly to
/// the native view rather than through a declarative re-render.
pub trait ScrollableView {
    /// Move the content to `offset`.
    fn scroll_to(&mut self, offset: f64, animated: bool);

    /// Enable or disable user scrolling.
    fn set_scroll_enabled(&mut self, enabled: bool);
}

// ---------------------------------------------------------------------------
// SceneProps
// ---------------------------------------------------------------------------

/// Host callback invoked when a pull gesture triggers a refresh.
pub type RefreshCallback = Box<dyn FnMut()>;

/// What the host declares for one scene.
pub struct SceneProps {
    /// Tab index this scene belongs to.
    pub index: usize,
    /// Pull-to-refresh callback. Scenes without one cannot be pulled.
    pub on_start_refresh: Option<RefreshCallback>,
    /// Controlled refresh flag.
    pub is_refreshing: bool,
    /// The host supplied its own scroll handler.
    pub has_scroll_handler: bool,
    /// Scroll event throttle the host asked for.
    pub scroll_event_throttle: Option<u32>,
    /// Directional lock the host asked for.
    pub directional_lock_enabled: Option<bool>,
    /// The host asked the list to keep its visible content position.
    pub maintain_visible_content_position: bool,
}

impl SceneProps {
    /// Props for the scene at `index` with nothing else declared.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            on_start_refresh: None,
            is_refreshing: false,
            has_scroll_handler: false,
            scroll_event_throttle: None,
            directional_lock_enabled: None,
            maintain_visible_content_position: false,
        }
    }

    /// Enable pull-to-refresh with the given callback (builder).
    pub fn with_refresh(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_start_refresh = Some(Box::new(callback));
        self
    }

    /// Set the controlled refresh flag (builder).
    pub fn refreshing(mut self, refreshing: bool) -> Self {
        self.is_refreshing = refreshing;
        self
    }

    /// Declare a host scroll handler (builder). It will be ignored.
    pub fn with_scroll_handler(mut self) -> Self {
        self.has_scroll_handler = true;
        self
    }

    /// Request a scroll event throttle (builder).
    pub fn with_scroll_event_throttle(mut self, ms: u32) -> Self {
        self.scroll_event_throttle = Some(ms);
        self
    }

    /// Request a directional lock setting (builder).
    pub fn with_directional_lock(mut self, enabled: bool) -> Self {
        self.directional_lock_enabled = Some(enabled);
        self
    }

    /// Request visible content position maintenance (builder).
    pub fn with_maintain_visible_content_position(mut self) -> Self {
        self.maintain_visible_content_position = true;
        self
    }

    /// Whether the scene supports pull-to-refresh.
    pub fn can_pull_refresh(&self) -> bool {
        self.on_start_refresh.is_some()
    }

    /// Props that conflict with what the engine owns. Each one is ignored.
    pub fn verify(&self) -> Vec<PropWarning> {
        let mut warnings = Vec::new();
        if self.has_scroll_handler {
            warnings.push(PropWarning::ScrollHandlerIgnored);
        }
        if let Some(ms) = self.scroll_event_throttle {
            if ms != SCROLL_EVENT_THROTTLE {
                warnings.push(PropWarning::ScrollEventThrottleOverridden(ms));
            }
        }
        if self.directional_lock_enabled == Some(false) {
            warnings.push(PropWarning::DirectionalLockForced);
        }
        if self.maintain_visible_content_position {
            warnings.push(PropWarning::MaintainVisibleContentPositionIgnored);
        }
        warnings
    }
}

impl fmt::Debug for SceneProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneProps")
            .field("index", &self.index)
            .field("can_pull_refresh", &self.can_pull_refresh())
            .field("is_refreshing", &self.is_refreshing)
            .field("has_scroll_handler", &self.has_scroll_handler)
            .field("scroll_event_throttle", &self.scroll_event_throttle)
            .field("directional_lock_enabled", &self.directional_lock_enabled)
            .field(
                "maintain_visible_content_position",
                &self.maintain_visible_content_position,
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// PropWarning
// ---------------------------------------------------------------------------

/// Non-fatal prop misuse. The offending value is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropWarning {
    /// The engine owns the scroll handler.
    ScrollHandlerIgnored,
    /// The engine forces a 16 ms throttle.
    ScrollEventThrottleOverridden(u32),
    /// The engine forces directional lock on.
    DirectionalLockForced,
    /// The engine disables visible content position maintenance.
    MaintainVisibleContentPositionIgnored,
}

impl fmt::Display for PropWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropWarning::ScrollHandlerIgnored => {
                write!(f, "do not assign a scroll handler; it is ignored")
            }
            PropWarning::ScrollEventThrottleOverridden(ms) => write!(
                f,
                "scroll event throttle {ms} ms replaced by {SCROLL_EVENT_THROTTLE} ms"
            ),
            PropWarning::DirectionalLockForced => {
                write!(f, "directional lock cannot be disabled")
            }
            PropWarning::MaintainVisibleContentPositionIgnored => {
                write!(f, "maintain visible content position is not supported")
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
