//! Pilot: programmatic interaction with a headless tab view.
//!
//! The `Pilot` mounts one [`RecordingView`] per tab, forwards simulated
//! gestures to the [`TabView`], and advances animations in fixed frames.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::CollapseConfig;
use crate::container::TabView;
use crate::error::Result;
use crate::scene::{SceneProps, ScrollableView};

/// Frame length used by [`Pilot::advance`].
pub const PILOT_FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames [`Pilot::settle`] runs before giving up.
const MAX_SETTLE_FRAMES: usize = 10_000;

// ---------------------------------------------------------------------------
// RecordingView
// ---------------------------------------------------------------------------

/// A command received by a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ScrollTo { offset: f64, animated: bool },
    SetScrollEnabled(bool),
}

/// A [`ScrollableView`] that records every command. Clones share the log, so
/// keep one clone for assertions and hand the other to the tab view.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    /// Offset of the latest `scroll_to`.
    pub fn last_offset(&self) -> Option<f64> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ViewCall::ScrollTo { offset, .. } => Some(*offset),
            ViewCall::SetScrollEnabled(_) => None,
        })
    }

    /// Latest scroll-enabled value.
    pub fn scroll_enabled(&self) -> Option<bool> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ViewCall::SetScrollEnabled(enabled) => Some(*enabled),
            ViewCall::ScrollTo { .. } => None,
        })
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ScrollableView for RecordingView {
    fn scroll_to(&mut self, offset: f64, animated: bool) {
        self.calls
            .borrow_mut()
            .push(ViewCall::ScrollTo { offset, animated });
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.calls
            .borrow_mut()
            .push(ViewCall::SetScrollEnabled(enabled));
    }
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless tab view driver for testing.
///
/// # Examples
///
/// ```ignore
/// use collapsible_tabs::testing::Pilot;
/// use collapsible_tabs::CollapseConfig;
///
/// let mut pilot = Pilot::new(CollapseConfig::default(), 2).unwrap();
/// pilot.scroll(0, 40.0);
/// assert_eq!(pilot.collapse(), 40.0);
/// ```
pub struct Pilot {
    tab_view: TabView,
    views: Vec<RecordingView>,
    refresh_requests: Rc<RefCell<Vec<usize>>>,
}

impl Pilot {
    /// Mount `tabs` scenes, each with a recording view.
    pub fn new(config: CollapseConfig, tabs: usize) -> Result<Self> {
        let mut tab_view = TabView::new("pilot", config)?;
        let mut views = Vec::with_capacity(tabs);
        for index in 0..tabs {
            let view = RecordingView::new();
            tab_view.mount_scene(SceneProps::new(index), Some(Box::new(view.clone())));
            views.push(view);
        }
        Ok(Self {
            tab_view,
            views,
            refresh_requests: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Remount scene `index` with a refresh callback that records requests
    /// (builder).
    pub fn with_refresh(mut self, index: usize) -> Self {
        let requests = Rc::clone(&self.refresh_requests);
        let props = SceneProps::new(index).with_refresh(move || requests.borrow_mut().push(index));
        let view = self.views.get(index).cloned().unwrap_or_default();
        self.tab_view.mount_scene(props, Some(Box::new(view)));
        self
    }

    pub fn tab_view(&self) -> &TabView {
        &self.tab_view
    }

    pub fn tab_view_mut(&mut self) -> &mut TabView {
        &mut self.tab_view
    }

    /// The recording view of tab `index`.
    ///
    /// # Panics
    ///
    /// Panics if no such tab was created.
    pub fn view(&self, index: usize) -> &RecordingView {
        &self.views[index]
    }

    pub fn collapse(&self) -> f64 {
        self.tab_view.collapse()
    }

    /// Scene indices whose refresh callback fired, in order.
    pub fn refresh_requests(&self) -> Vec<usize> {
        self.refresh_requests.borrow().clone()
    }

    // ── Gesture simulation ───────────────────────────────────────────

    pub fn scroll(&mut self, index: usize, y: f64) {
        self.tab_view.on_scroll(index, y);
    }

    /// A full drag: begin, one scroll event per offset, release.
    pub fn drag(&mut self, index: usize, offsets: &[f64]) {
        self.tab_view.on_scroll_begin_drag(index);
        for &y in offsets {
            self.tab_view.on_scroll(index, y);
        }
        self.tab_view.on_scroll_end_drag(index);
    }

    /// Pull the refresh control of `index` by `distance` and release.
    pub fn pull(&mut self, index: usize, distance: f64) {
        if self.tab_view.begin_pull(index) {
            self.tab_view.pull_to(index, distance);
            self.tab_view.end_pull(index);
        }
    }

    /// Pager switch: swipe start, settle on `index`, swipe end.
    pub fn swipe_to(&mut self, index: usize) {
        self.tab_view.on_swipe_start();
        self.tab_view.set_current_index(index);
        self.tab_view.on_swipe_end();
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance time in fixed frames. A trailing partial frame is ticked too.
    pub fn advance(&mut self, duration: Duration) {
        let mut remaining = duration;
        while remaining > Duration::ZERO {
            let step = remaining.min(PILOT_FRAME);
            self.tab_view.tick(step);
            remaining -= step;
        }
    }

    /// Tick frames until nothing animates. Returns the frames used.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while !self.tab_view.is_idle() && frames < MAX_SETTLE_FRAMES {
            self.tab_view.tick(PILOT_FRAME);
            frames += 1;
        }
        frames
    }
}

// ===========================================================================
// Tests
// ===========================================================================
