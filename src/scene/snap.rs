//! Snap-after-release decisions.
//!
//! Once a gesture ends the header should not rest half collapsed. A snap is
//! requested, debounced for `scrolling_check_duration`, and if nothing
//! interfered in the meantime the header moves to whichever boundary is
//! nearer.

/// Inputs of the "can snap now" predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapGuard {
    pub need_snap: bool,
    pub touching_tabs: bool,
    pub sliding_header: bool,
    pub is_refreshing: bool,
    pub refreshing_with_animation: bool,
    pub tabs_working: bool,
    pub is_dragging: bool,
    pub losing_momentum: bool,
}

impl SnapGuard {
    /// Whether a snap may fire.
    pub fn allows(&self) -> bool {
        self.need_snap
            && !self.touching_tabs
            && !self.sliding_header
            && !self.is_refreshing
            && !self.refreshing_with_animation
            && !self.tabs_working
            && !self.is_dragging
            && !self.losing_momentum
    }
}

/// Pending snap request for one scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapState {
    need_snap: bool,
}

impl SnapState {
    pub fn need_snap(&self) -> bool {
        self.need_snap
    }

    pub fn request(&mut self) {
        self.need_snap = true;
    }

    pub fn clear(&mut self) {
        self.need_snap = false;
    }
}

/// Resting position for the header, or `None` if it already rests.
///
/// Values at or below 0 and past the collapse limit need no snap. Exactly
/// half way resolves to expanded.
pub fn snap_destination(shared: f64, header_height: f64, froze_top: f64) -> Option<f64> {
    let limit = header_height - froze_top;
    if shared <= 0.0 || shared > limit {
        return None;
    }
    if shared > limit / 2.0 {
        Some(limit)
    } else {
        Some(0.0)
    }
}
