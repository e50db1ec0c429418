//! Async frame loop.
//!
//! [`FrameDriver`] runs the coordinating loop on a tokio interval: pump the
//! bus, tick animations, flush reactions. The tab view is not `Send`, so the
//! loop runs on the caller's task rather than a spawned one.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::container::TabView;

/// Default frame length (about 60 fps).
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Fixed-rate driver for a [`TabView`].
#[derive(Debug, Clone, Copy)]
pub struct FrameDriver {
    frame: Duration,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            frame: DEFAULT_FRAME,
        }
    }

    /// Use a custom frame length (builder). Zero keeps the default.
    pub fn with_frame(mut self, frame: Duration) -> Self {
        if !frame.is_zero() {
            self.frame = frame;
        }
        self
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// One frame without waiting.
    pub fn step(&self, tab_view: &mut TabView) {
        let events = tab_view.pump_bus();
        if events > 0 {
            trace!(events, "bus events handled");
        }
        tab_view.tick(self.frame);
    }

    /// Run frames for `total`, rounded up to whole frames. Returns the frame
    /// count.
    pub async fn run_for(&self, tab_view: &mut TabView, total: Duration) -> usize {
        let frames = total.as_nanos().div_ceil(self.frame.as_nanos()) as usize;
        let mut interval = self.interval().await;
        for _ in 0..frames {
            interval.tick().await;
            self.step(tab_view);
        }
        debug!(frames, "frame loop finished");
        frames
    }

    /// Run frames until the tab view is idle, at most `max_frames`.
    pub async fn run_until_idle(&self, tab_view: &mut TabView, max_frames: usize) -> usize {
        let mut interval = self.interval().await;
        let mut frames = 0;
        tab_view.pump_bus();
        while !tab_view.is_idle() && frames < max_frames {
            interval.tick().await;
            self.step(tab_view);
            frames += 1;
        }
        debug!(frames, idle = tab_view.is_idle(), "frame loop settled");
        frames
    }

    async fn interval(&self) -> time::Interval {
        let mut interval = time::interval(self.frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;
        interval
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollapseConfig;
    use crate::event::{BusEvent, EventBus, OffsetParams};
    use crate::scene::SceneProps;
    use crate::testing::RecordingView;

    fn tab_view() -> (TabView, RecordingView) {
        let config = CollapseConfig::new()
            .with_header_height(100.0)
            .with_tabbar_height(40.0)
            .with_snap(true);
        let mut tv = TabView::new("driven", config).unwrap();
        let view = RecordingView::new();
        tv.mount_scene(SceneProps::new(0), Some(Box::new(view.clone())));
        (tv, view)
    }

    #[test]
    fn zero_frame_keeps_default() {
        let driver = FrameDriver::new().with_frame(Duration::ZERO);
        assert_eq!(driver.frame(), DEFAULT_FRAME);
    }

    #[test]
    fn step_pumps_bus() {
        let bus = EventBus::new();
        let (mut tv, view) = tab_view();
        tv.attach_bus(&bus);
        bus.emit(BusEvent::ScrollToOffset {
            component_id: "driven".into(),
            params: OffsetParams::new(25.0),
        });
        FrameDriver::new().step(&mut tv);
        assert_eq!(view.last_offset(), Some(25.0));
        assert_eq!(tv.collapse(), 25.0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_for_drives_snap_on_paused_clock() {
        let (mut tv, _) = tab_view();
        tv.on_scroll_begin_drag(0);
        tv.on_scroll(0, 70.0);
        tv.on_scroll_end_drag(0);

        let start = time::Instant::now();
        let frames = FrameDriver::new()
            .run_for(&mut tv, Duration::from_millis(500))
            .await;
        assert_eq!(frames, 32);
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(tv.collapse(), 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_until_idle_stops_when_settled() {
        let (mut tv, _) = tab_view();
        let driver = FrameDriver::new();
        assert_eq!(driver.run_until_idle(&mut tv, 100).await, 0);

        tv.on_scroll(0, 30.0);
        tv.on_scroll_end_drag(0);
        let frames = driver.run_until_idle(&mut tv, 1_000).await;
        assert!(frames > 0 && frames < 1_000);
        assert!(tv.is_idle());
        assert_eq!(tv.collapse(), 0.0);
    }
}
