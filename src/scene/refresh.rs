//! Pull-to-refresh state machine for one scene.
//!
//! The refresh *track* is a single number describing both the refresh control
//! and the list position while a refresh owns the scene:
//!
//! - `track < refresh_height`: the control is revealed by
//!   `refresh_height - track` and the list sits at the top.
//! - `track >= refresh_height`: the control is hidden and the list is scrolled
//!   to `track - refresh_height`.
//!
//! Two flags encode the phase: `is_refreshing` and
//! `is_refreshing_with_animation`. [`RefreshState`] only performs the pure
//! transitions; the scene controller starts the animations and applies frames.

/// Observable refresh phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    /// Nothing in flight.
    Idle,
    /// The user is dragging the refresh control.
    Pulling,
    /// The control animates into its revealed position.
    AnimatingIn,
    /// The refresh is running; content and header are pinned.
    Held,
    /// The control animates away and the list position is restored.
    AnimatingOut,
}

/// Result of releasing a pull gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Pulled past the threshold: a refresh starts.
    Triggered,
    /// Released early: the control springs back.
    Released,
    /// No pull was in progress.
    Ignored,
}

/// Destination of the track when a refresh stops.
///
/// Past `header_height + refresh_height` the shared value is kept as is;
/// otherwise the refresh height is added so the list keeps the position that
/// matches the current header collapse.
pub fn stop_destination(shared: f64, header_height: f64, refresh_height: f64) -> f64 {
    if shared > header_height + refresh_height {
        shared
    } else {
        shared + refresh_height
    }
}

/// Refresh flags and track for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshState {
    refresh_height: f64,
    track: f64,
    is_refreshing: bool,
    with_animation: bool,
    is_dragging: bool,
}

impl RefreshState {
    /// Idle state with the control hidden.
    pub fn new(refresh_height: f64) -> Self {
        Self {
            refresh_height,
            track: refresh_height,
            is_refreshing: false,
            with_animation: false,
            is_dragging: false,
        }
    }

    /// Current phase derived from the flags.
    pub fn phase(&self) -> RefreshPhase {
        match (self.is_refreshing, self.with_animation) {
            (true, true) => RefreshPhase::AnimatingIn,
            (true, false) => RefreshPhase::Held,
            (false, true) => RefreshPhase::AnimatingOut,
            (false, false) if self.is_dragging => RefreshPhase::Pulling,
            (false, false) => RefreshPhase::Idle,
        }
    }

    pub fn refresh_height(&self) -> f64 {
        self.refresh_height
    }

    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    pub fn is_refreshing_with_animation(&self) -> bool {
        self.with_animation
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Refreshing in either mode.
    pub fn is_busy(&self) -> bool {
        self.is_refreshing || self.with_animation
    }

    /// Both flags agree. Shared writes are only accepted in this case.
    pub fn flags_agree(&self) -> bool {
        self.is_refreshing == self.with_animation
    }

    /// Raw track value.
    pub fn track(&self) -> f64 {
        self.track
    }

    /// Refresh translation in `[0, refresh_height]`: 0 = revealed.
    pub fn translation(&self) -> f64 {
        self.track.clamp(0.0, self.refresh_height)
    }

    /// How far the refresh control is revealed.
    pub fn reveal(&self) -> f64 {
        (self.refresh_height - self.track).max(0.0)
    }

    pub(crate) fn set_track(&mut self, track: f64) {
        self.track = track;
    }

    // ── Pull gesture ─────────────────────────────────────────────────

    /// Start a pull. Refused while a refresh is in flight.
    pub fn begin_pull(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.is_dragging = true;
        true
    }

    /// Update the pull distance.
    pub fn pull_to(&mut self, distance: f64) -> bool {
        if !self.is_dragging || self.is_busy() {
            return false;
        }
        self.track = self.refresh_height - distance.max(0.0);
        true
    }

    /// Release the pull.
    pub fn end_pull(&mut self) -> PullOutcome {
        if !self.is_dragging {
            return PullOutcome::Ignored;
        }
        self.is_dragging = false;
        if self.track <= 0.0 {
            PullOutcome::Triggered
        } else {
            PullOutcome::Released
        }
    }

    // ── Start / stop ─────────────────────────────────────────────────

    /// Enter `AnimatingIn`. Returns the track value the reveal animation
    /// starts from, or `None` if a refresh is already running.
    ///
    /// An unpulled control starts from the shared value so the header does
    /// not jump.
    pub fn start(&mut self, shared: f64) -> Option<f64> {
        if self.is_refreshing {
            return None;
        }
        if !self.with_animation && self.track >= self.refresh_height {
            self.track = shared;
        }
        self.is_refreshing = true;
        self.with_animation = true;
        self.is_dragging = false;
        Some(self.track)
    }

    /// Enter `AnimatingOut`. Returns the track destination, or `None` if
    /// nothing is refreshing.
    pub fn stop(&mut self, shared: f64, header_height: f64) -> Option<f64> {
        if !self.is_busy() {
            return None;
        }
        self.is_refreshing = false;
        self.with_animation = true;
        Some(stop_destination(shared, header_height, self.refresh_height))
    }

    /// Settle after a refresh animation completed. Returns the new phase if
    /// the completion caused a transition.
    pub fn finish(&mut self) -> Option<RefreshPhase> {
        match self.phase() {
            RefreshPhase::AnimatingIn => {
                self.with_animation = false;
                Some(RefreshPhase::Held)
            }
            RefreshPhase::AnimatingOut => {
                self.with_animation = false;
                self.track = self.refresh_height;
                Some(RefreshPhase::Idle)
            }
            _ => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
