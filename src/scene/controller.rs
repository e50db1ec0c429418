//! Per-tab scene controller.
//!
//! A [`SceneController`] wraps one host list. It reads native scroll events,
//! decides whether they may move the shared collapse value, owns the scene's
//! refresh and snap state, and pushes scroll commands back to the host view.
//! Everything shared with sibling scenes goes through [`SceneCx`].

use std::fmt;

use tracing::{debug, trace, warn};

use crate::animation::{AnimationEnd, AnimationFrame, AnimationId, AnimationTarget, Animator, EasingType, Timing};
use crate::config::CollapseConfig;
use crate::context::SharedContext;
use crate::reactive::Notification;

use super::layout::SceneMeasurements;
use super::refresh::{PullOutcome, RefreshPhase, RefreshState};
use super::snap::{snap_destination, SnapGuard, SnapState};
use super::view::{PropWarning, RefreshCallback, SceneProps, ScrollableView};

// ---------------------------------------------------------------------------
// SceneCx
// ---------------------------------------------------------------------------

/// Mutable access to the state scenes share: the context and the animator.
pub struct SceneCx<'a> {
    pub ctx: &'a mut SharedContext,
    pub animator: &'a mut Animator,
}

impl<'a> SceneCx<'a> {
    pub fn new(ctx: &'a mut SharedContext, animator: &'a mut Animator) -> Self {
        Self { ctx, animator }
    }

    pub fn config(&self) -> &CollapseConfig {
        self.ctx.config()
    }

    /// Start an animation, replacing whatever drove `target` before.
    pub fn start_animation(&mut self, target: AnimationTarget, timing: Timing) -> AnimationId {
        let (id, preempted) = self.animator.start(target, timing);
        if let Some(end) = preempted {
            trace!(?target, value = end.value, "animation preempted");
        }
        id
    }

    /// Cancel the animation driving `target`. Returns `true` if one ran.
    pub fn cancel_animation(&mut self, target: AnimationTarget) -> bool {
        self.animator.cancel(target).is_some()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.ctx.reactor().notify(notification);
    }
}

// ---------------------------------------------------------------------------
// SceneController
// ---------------------------------------------------------------------------

/// Scroll synchronization state for one tab.
pub struct SceneController {
    index: usize,
    view: Option<Box<dyn ScrollableView>>,
    on_start_refresh: Option<RefreshCallback>,
    real_offset: f64,
    offset: f64,
    is_losing_momentum: bool,
    scroll_enabled: Option<bool>,
    refresh: RefreshState,
    snap: SnapState,
    measurements: SceneMeasurements,
    position_synced: bool,
    refresh_prop: Option<bool>,
    warnings: Vec<PropWarning>,
}

impl SceneController {
    /// Build a controller from host props. Conflicting props are logged and
    /// ignored; the controlled refresh flag is applied by the caller through
    /// [`SceneController::set_refreshing`].
    pub fn new(props: SceneProps, config: &CollapseConfig) -> Self {
        let warnings = props.verify();
        for warning in &warnings {
            warn!(scene = props.index, "{warning}");
        }
        Self {
            index: props.index,
            view: None,
            on_start_refresh: props.on_start_refresh,
            real_offset: 0.0,
            offset: 0.0,
            is_losing_momentum: false,
            scroll_enabled: None,
            refresh: RefreshState::new(config.refresh_height),
            snap: SnapState::default(),
            measurements: SceneMeasurements::default(),
            position_synced: false,
            refresh_prop: None,
            warnings,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn index(&self) -> usize {
        self.index
    }

    /// Last raw offset reported by the host list.
    pub fn real_offset(&self) -> f64 {
        self.real_offset
    }

    /// Last accepted offset, never negative.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn refresh(&self) -> &RefreshState {
        &self.refresh
    }

    pub fn refresh_phase(&self) -> RefreshPhase {
        self.refresh.phase()
    }

    pub fn need_snap(&self) -> bool {
        self.snap.need_snap()
    }

    pub fn is_losing_momentum(&self) -> bool {
        self.is_losing_momentum
    }

    pub fn can_pull_refresh(&self) -> bool {
        self.on_start_refresh.is_some()
    }

    pub fn measurements(&self) -> &SceneMeasurements {
        &self.measurements
    }

    pub(crate) fn measurements_mut(&mut self) -> &mut SceneMeasurements {
        &mut self.measurements
    }

    /// Prop conflicts found at construction.
    pub fn warnings(&self) -> &[PropWarning] {
        &self.warnings
    }

    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    /// Scroll-enabled value last pushed to the view.
    pub fn scroll_enabled(&self) -> Option<bool> {
        self.scroll_enabled
    }

    /// Whether the list has been moved to its initial synced position.
    pub fn position_synced(&self) -> bool {
        self.position_synced
    }

    /// Scenes stay invisible until their initial position is synced.
    pub fn opacity(&self) -> f64 {
        if self.position_synced {
            1.0
        } else {
            0.0
        }
    }

    // ── View binding ─────────────────────────────────────────────────

    pub fn attach_view(&mut self, cx: &mut SceneCx<'_>, view: Box<dyn ScrollableView>) {
        self.view = Some(view);
        self.scroll_enabled = None;
        self.update_scroll_enabled(cx);
        self.try_sync_initial_position(cx);
    }

    pub fn detach_view(&mut self) -> Option<Box<dyn ScrollableView>> {
        self.scroll_enabled = None;
        self.view.take()
    }

    // ── Gating ───────────────────────────────────────────────────────

    fn is_active(&self, ctx: &SharedContext) -> bool {
        ctx.active_index() == self.index
    }

    /// Whether the user may scroll this scene right now.
    pub fn may_scroll(&self, ctx: &SharedContext) -> bool {
        !self.refresh.is_dragging()
            && !ctx.tabs_working()
            && !self.refresh.is_busy()
            && self.is_active(ctx)
    }

    /// Push the scroll-enabled flag to the view if it changed.
    pub fn update_scroll_enabled(&mut self, cx: &mut SceneCx<'_>) {
        let enabled = self.may_scroll(cx.ctx);
        if self.scroll_enabled == Some(enabled) {
            return;
        }
        if let Some(view) = self.view.as_mut() {
            trace!(scene = self.index, enabled, "scroll enabled");
            view.set_scroll_enabled(enabled);
            self.scroll_enabled = Some(enabled);
        }
    }

    fn publish(&self, cx: &mut SceneCx<'_>, value: f64) {
        if self.is_active(cx.ctx) && self.refresh.flags_agree() {
            cx.ctx.write_shared(value);
        }
    }

    fn state_changed(&self, cx: &mut SceneCx<'_>) {
        cx.notify(Notification::SceneStateChanged(self.index));
    }

    // ── Native scroll events ─────────────────────────────────────────

    /// Handle a native scroll event at offset `y`.
    pub fn on_scroll(&mut self, cx: &mut SceneCx<'_>, y: f64) {
        self.real_offset = y;
        if self.refresh.is_busy() {
            return;
        }
        self.try_snap(cx);
        self.offset = y.max(0.0);
        self.publish(cx, self.offset);
    }

    pub fn on_scroll_begin_drag(&mut self, cx: &mut SceneCx<'_>) {
        self.cancel_snap(cx);
        cx.cancel_animation(AnimationTarget::SceneOffset(self.index));
    }

    pub fn on_scroll_end_drag(&mut self, cx: &mut SceneCx<'_>) {
        self.request_snap(cx);
    }

    pub fn on_momentum_begin(&mut self, cx: &mut SceneCx<'_>) {
        self.is_losing_momentum = true;
        self.cancel_snap(cx);
    }

    pub fn on_momentum_end(&mut self, cx: &mut SceneCx<'_>) {
        self.is_losing_momentum = false;
        self.request_snap(cx);
    }

    /// Record a content size change and sync the initial position once the
    /// content is tall enough to collapse the header.
    pub fn on_content_size_change(&mut self, cx: &mut SceneCx<'_>, height: f64) {
        self.measurements.content_height = height;
        self.try_sync_initial_position(cx);
    }

    /// Sync the initial position from the last recorded content height.
    /// Does nothing until the container is laid out, the view is attached,
    /// and the content is tall enough; later layout events retry.
    pub fn try_sync_initial_position(&mut self, cx: &mut SceneCx<'_>) -> bool {
        if self.position_synced || self.view.is_none() || cx.ctx.container_height() <= 0.0 {
            return false;
        }
        if self.measurements.content_height.ceil() < cx.ctx.expect_height() {
            return false;
        }
        let adjust = if self.refresh.is_refreshing() {
            self.refresh.refresh_height()
        } else {
            0.0
        };
        let limit = cx.config().collapse_limit();
        let target = (cx.ctx.shared_offset() - adjust).clamp(0.0, limit);
        if !self.sync_to(target) {
            return false;
        }
        self.position_synced = true;
        debug!(scene = self.index, offset = target, "initial position synced");
        true
    }

    /// Move the list without publishing. Used to keep inactive scenes aligned
    /// with the header. Returns `false` without a view.
    pub fn sync_to(&mut self, offset: f64) -> bool {
        let Some(view) = self.view.as_mut() else {
            return false;
        };
        view.scroll_to(offset, false);
        self.offset = offset;
        self.real_offset = offset;
        true
    }

    // ── Programmatic scrolling ───────────────────────────────────────

    /// Scroll to `offset`. Ignored while refreshing or without a view.
    pub fn scroll_to(&mut self, cx: &mut SceneCx<'_>, offset: f64, animated: bool) -> bool {
        if self.refresh.is_busy() {
            debug!(scene = self.index, "scroll command ignored while refreshing");
            return false;
        }
        if self.view.is_none() {
            debug!(scene = self.index, "scroll command ignored without a view");
            return false;
        }
        if animated {
            self.animate_offset(cx, offset);
        } else {
            cx.cancel_animation(AnimationTarget::SceneOffset(self.index));
            self.apply_offset(cx, offset);
        }
        true
    }

    fn animate_offset(&mut self, cx: &mut SceneCx<'_>, to: f64) {
        let timing = Timing::new(
            self.offset,
            to,
            cx.config().animation_duration(),
            cx.config().easing,
        );
        cx.start_animation(AnimationTarget::SceneOffset(self.index), timing);
    }

    fn apply_offset(&mut self, cx: &mut SceneCx<'_>, offset: f64) {
        if let Some(view) = self.view.as_mut() {
            view.scroll_to(offset, false);
        }
        self.on_scroll(cx, offset);
    }

    // ── Animation frames ─────────────────────────────────────────────

    /// Apply one interpolated value for a target this scene owns.
    pub fn apply_frame(&mut self, cx: &mut SceneCx<'_>, frame: &AnimationFrame) {
        match frame.target {
            AnimationTarget::RefreshTrack(_) => self.on_refresh_track(cx, frame.value),
            AnimationTarget::SceneOffset(_) => self.apply_offset(cx, frame.value),
            AnimationTarget::SnapDebounce(_) => {}
        }
    }

    fn list_offset(&self) -> f64 {
        (self.refresh.track() - self.refresh.refresh_height()).max(0.0)
    }

    fn on_refresh_track(&mut self, cx: &mut SceneCx<'_>, track: f64) {
        self.refresh.set_track(track);
        match self.refresh.phase() {
            RefreshPhase::AnimatingIn => {
                let list = self.list_offset();
                if let Some(view) = self.view.as_mut() {
                    view.scroll_to(list, false);
                }
                self.offset = track.max(0.0);
                self.publish(cx, self.offset);
            }
            RefreshPhase::AnimatingOut => {
                let list = self.list_offset();
                if let Some(view) = self.view.as_mut() {
                    view.scroll_to(list, false);
                }
                self.offset = list;
            }
            _ => {}
        }
    }

    /// React to an animation owned by this scene finishing or being cancelled.
    pub fn on_animation_end(&mut self, cx: &mut SceneCx<'_>, end: &AnimationEnd) {
        if !end.finished {
            return;
        }
        match end.target {
            AnimationTarget::RefreshTrack(_) => self.finish_refresh_animation(cx),
            AnimationTarget::SceneOffset(_) => {
                trace!(scene = self.index, offset = end.value, "offset animation done");
            }
            AnimationTarget::SnapDebounce(_) => self.snap_now(cx),
        }
    }

    fn finish_refresh_animation(&mut self, cx: &mut SceneCx<'_>) {
        let list = self.list_offset();
        match self.refresh.finish() {
            Some(RefreshPhase::Held) => {
                debug!(scene = self.index, "refresh held");
            }
            Some(RefreshPhase::Idle) => {
                self.offset = list;
                self.real_offset = list;
                self.publish(cx, self.offset);
                debug!(scene = self.index, offset = list, "refresh finished");
            }
            _ => {}
        }
        self.state_changed(cx);
    }

    // ── Snap ─────────────────────────────────────────────────────────

    fn snap_guard(&self, ctx: &SharedContext) -> SnapGuard {
        SnapGuard {
            need_snap: self.snap.need_snap(),
            touching_tabs: ctx.touching_tabs(),
            sliding_header: ctx.sliding_header(),
            is_refreshing: self.refresh.is_refreshing(),
            refreshing_with_animation: self.refresh.is_refreshing_with_animation(),
            tabs_working: ctx.tabs_working(),
            is_dragging: self.refresh.is_dragging(),
            losing_momentum: self.is_losing_momentum,
        }
    }

    /// Whether a snap may fire now. Only the active scene snaps.
    pub fn can_snap(&self, ctx: &SharedContext) -> bool {
        ctx.config().enable_snap && self.is_active(ctx) && self.snap_guard(ctx).allows()
    }

    /// Mark a snap as wanted and try it.
    pub fn request_snap(&mut self, cx: &mut SceneCx<'_>) {
        if !cx.config().enable_snap {
            return;
        }
        self.snap.request();
        self.try_snap(cx);
    }

    /// Restart the snap debounce if a snap may fire.
    pub fn try_snap(&mut self, cx: &mut SceneCx<'_>) {
        self.cancel_snap(cx);
        if !self.can_snap(cx.ctx) {
            return;
        }
        let timing = Timing::new(
            1.0,
            0.0,
            cx.config().scrolling_check_duration(),
            EasingType::Linear,
        );
        cx.start_animation(AnimationTarget::SnapDebounce(self.index), timing);
    }

    /// Drop a pending debounce. The snap request itself stays.
    pub fn cancel_snap(&mut self, cx: &mut SceneCx<'_>) {
        cx.cancel_animation(AnimationTarget::SnapDebounce(self.index));
    }

    fn snap_now(&mut self, cx: &mut SceneCx<'_>) {
        if !self.can_snap(cx.ctx) {
            return;
        }
        self.snap.clear();
        let config = cx.config();
        let destination = snap_destination(cx.ctx.shared_offset(), config.header_height, config.froze_top);
        if let Some(to) = destination {
            debug!(scene = self.index, from = self.offset, to, "snapping header");
            self.animate_offset(cx, to);
        }
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Apply the host's controlled refresh flag. The first value only acts
    /// when it is `true`; repeated values are ignored.
    pub fn set_refreshing(&mut self, cx: &mut SceneCx<'_>, refreshing: bool) {
        let previous = self.refresh_prop.replace(refreshing);
        if previous == Some(refreshing) {
            return;
        }
        if refreshing {
            self.start_refresh(cx);
        } else if previous.is_some() {
            self.stop_refresh(cx);
        }
    }

    /// Enter `AnimatingIn`. Returns `false` if a refresh already runs.
    pub fn start_refresh(&mut self, cx: &mut SceneCx<'_>) -> bool {
        let Some(from) = self.refresh.start(cx.ctx.shared_offset()) else {
            return false;
        };
        self.cancel_snap(cx);
        cx.cancel_animation(AnimationTarget::SceneOffset(self.index));
        let timing = Timing::new(from, 0.0, cx.config().animation_duration(), cx.config().easing);
        cx.start_animation(AnimationTarget::RefreshTrack(self.index), timing);
        debug!(scene = self.index, from, "refresh started");
        self.state_changed(cx);
        true
    }

    /// Enter `AnimatingOut`. Returns `false` if nothing is refreshing.
    pub fn stop_refresh(&mut self, cx: &mut SceneCx<'_>) -> bool {
        let header = cx.config().header_height;
        let from = self.refresh.track();
        let Some(to) = self.refresh.stop(cx.ctx.shared_offset(), header) else {
            return false;
        };
        let timing = Timing::new(from, to, cx.config().animation_duration(), cx.config().easing);
        cx.start_animation(AnimationTarget::RefreshTrack(self.index), timing);
        debug!(scene = self.index, from, to, "refresh stopping");
        self.state_changed(cx);
        true
    }

    // ── Pull gesture ─────────────────────────────────────────────────

    /// Start pulling the refresh control. Only the active scene at the top
    /// of its list with a refresh callback can be pulled.
    pub fn begin_pull(&mut self, cx: &mut SceneCx<'_>) -> bool {
        if !self.is_active(cx.ctx) || !self.can_pull_refresh() || self.real_offset > 0.0 {
            return false;
        }
        if !self.refresh.begin_pull() {
            return false;
        }
        self.cancel_snap(cx);
        cx.cancel_animation(AnimationTarget::SceneOffset(self.index));
        cx.cancel_animation(AnimationTarget::RefreshTrack(self.index));
        self.state_changed(cx);
        true
    }

    pub fn pull_to(&mut self, distance: f64) -> bool {
        self.refresh.pull_to(distance)
    }

    /// Release the pull. Past the threshold this starts a refresh and calls
    /// the host callback.
    pub fn end_pull(&mut self, cx: &mut SceneCx<'_>) -> PullOutcome {
        let outcome = self.refresh.end_pull();
        match outcome {
            PullOutcome::Triggered => {
                self.start_refresh(cx);
                self.refresh_prop = Some(true);
                if let Some(callback) = self.on_start_refresh.as_mut() {
                    debug!(scene = self.index, "pull triggered refresh");
                    callback();
                }
            }
            PullOutcome::Released => {
                let timing = Timing::new(
                    self.refresh.track(),
                    self.refresh.refresh_height(),
                    cx.config().animation_duration(),
                    cx.config().easing,
                );
                cx.start_animation(AnimationTarget::RefreshTrack(self.index), timing);
                self.state_changed(cx);
            }
            PullOutcome::Ignored => {}
        }
        outcome
    }
}

impl fmt::Debug for SceneController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneController")
            .field("index", &self.index)
            .field("has_view", &self.view.is_some())
            .field("real_offset", &self.real_offset)
            .field("offset", &self.offset)
            .field("refresh", &self.refresh)
            .field("need_snap", &self.snap.need_snap())
            .field("position_synced", &self.position_synced)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{RecordingView, ViewCall};

    fn setup() -> (SharedContext, Animator) {
        let config = CollapseConfig::new()
            .with_header_height(100.0)
            .with_tabbar_height(40.0)
            .with_refresh_height(60.0)
            .with_snap(true);
        (SharedContext::new(config, 0), Animator::new())
    }

    fn scene(ctx: &mut SharedContext, animator: &mut Animator, index: usize) -> (SceneController, RecordingView) {
        let mut scene = SceneController::new(SceneProps::new(index).with_refresh(|| {}), ctx.config());
        let view = RecordingView::new();
        scene.attach_view(&mut SceneCx::new(ctx, animator), Box::new(view.clone()));
        (scene, view)
    }

    // ── Publishing ───────────────────────────────────────────────────

    #[test]
    fn active_scroll_publishes_clamped_offset() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 40.0);
        assert_eq!(ctx.shared_offset(), 40.0);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), -25.0);
        assert_eq!(s.real_offset(), -25.0);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(ctx.shared_offset(), 0.0);
    }

    #[test]
    fn inactive_scroll_does_not_publish() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 1);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 80.0);
        assert_eq!(s.offset(), 80.0);
        assert_eq!(ctx.shared_offset(), 0.0);
    }

    #[test]
    fn refreshing_scene_ignores_scroll() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.start_refresh(&mut SceneCx::new(&mut ctx, &mut anim));
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 50.0);
        assert_eq!(s.real_offset(), 50.0);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(ctx.shared_offset(), 0.0);
    }

    // ── Scroll enabled ───────────────────────────────────────────────

    #[test]
    fn scroll_enabled_pushed_on_change_only() {
        let (mut ctx, mut anim) = setup();
        let (mut s, view) = scene(&mut ctx, &mut anim, 0);
        s.update_scroll_enabled(&mut SceneCx::new(&mut ctx, &mut anim));
        assert_eq!(view.calls(), vec![ViewCall::SetScrollEnabled(true)]);

        ctx.set_tabs_working(true);
        s.update_scroll_enabled(&mut SceneCx::new(&mut ctx, &mut anim));
        s.update_scroll_enabled(&mut SceneCx::new(&mut ctx, &mut anim));
        assert_eq!(view.scroll_enabled(), Some(false));
        assert_eq!(view.calls().len(), 2);
    }

    #[test]
    fn inactive_scene_cannot_scroll() {
        let (mut ctx, mut anim) = setup();
        let (s, view) = scene(&mut ctx, &mut anim, 2);
        assert!(!s.may_scroll(&ctx));
        assert_eq!(view.scroll_enabled(), Some(false));
    }

    // ── Refresh ──────────────────────────────────────────────────────

    #[test]
    fn immediate_stop_targets_shared_plus_refresh_height() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 30.0);
        assert!(s.start_refresh(&mut SceneCx::new(&mut ctx, &mut anim)));
        assert!(s.stop_refresh(&mut SceneCx::new(&mut ctx, &mut anim)));
        assert_eq!(s.refresh_phase(), RefreshPhase::AnimatingOut);
        assert_eq!(anim.destination(AnimationTarget::RefreshTrack(0)), Some(90.0));
    }

    #[test]
    fn controlled_flag_first_false_is_noop() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.set_refreshing(&mut SceneCx::new(&mut ctx, &mut anim), false);
        assert_eq!(s.refresh_phase(), RefreshPhase::Idle);
        assert!(anim.is_empty());

        s.set_refreshing(&mut SceneCx::new(&mut ctx, &mut anim), true);
        s.set_refreshing(&mut SceneCx::new(&mut ctx, &mut anim), true);
        assert_eq!(s.refresh_phase(), RefreshPhase::AnimatingIn);
    }

    #[test]
    fn refresh_frames_follow_track() {
        let (mut ctx, mut anim) = setup();
        let (mut s, view) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 30.0);
        s.start_refresh(&mut SceneCx::new(&mut ctx, &mut anim));

        let out = anim.tick(Duration::from_millis(400));
        for frame in &out.frames {
            s.apply_frame(&mut SceneCx::new(&mut ctx, &mut anim), frame);
        }
        for end in &out.ends {
            s.on_animation_end(&mut SceneCx::new(&mut ctx, &mut anim), end);
        }
        assert_eq!(s.refresh_phase(), RefreshPhase::Held);
        assert_eq!(s.refresh().reveal(), 60.0);
        assert_eq!(ctx.shared_offset(), 0.0);
        assert_eq!(view.last_offset(), Some(0.0));
    }

    #[test]
    fn scroll_command_ignored_while_refreshing() {
        let (mut ctx, mut anim) = setup();
        let (mut s, view) = scene(&mut ctx, &mut anim, 0);
        s.start_refresh(&mut SceneCx::new(&mut ctx, &mut anim));
        view.clear();
        assert!(!s.scroll_to(&mut SceneCx::new(&mut ctx, &mut anim), 100.0, false));
        assert!(view.calls().is_empty());
    }

    // ── Pull ─────────────────────────────────────────────────────────

    #[test]
    fn pull_requires_top_of_list() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 10.0);
        assert!(!s.begin_pull(&mut SceneCx::new(&mut ctx, &mut anim)));
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 0.0);
        assert!(s.begin_pull(&mut SceneCx::new(&mut ctx, &mut anim)));
        assert!(!s.may_scroll(&ctx));
    }

    #[test]
    fn released_pull_springs_back() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.begin_pull(&mut SceneCx::new(&mut ctx, &mut anim));
        s.pull_to(20.0);
        let outcome = s.end_pull(&mut SceneCx::new(&mut ctx, &mut anim));
        assert_eq!(outcome, PullOutcome::Released);
        assert_eq!(anim.destination(AnimationTarget::RefreshTrack(0)), Some(60.0));
    }

    // ── Snap ─────────────────────────────────────────────────────────

    #[test]
    fn scroll_alone_does_not_arm_snap() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 70.0);
        assert!(!anim.is_running(AnimationTarget::SnapDebounce(0)));
        s.on_scroll_end_drag(&mut SceneCx::new(&mut ctx, &mut anim));
        assert!(s.need_snap());
        assert!(anim.is_running(AnimationTarget::SnapDebounce(0)));
    }

    #[test]
    fn begin_drag_cancels_debounce_but_keeps_request() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll_end_drag(&mut SceneCx::new(&mut ctx, &mut anim));
        s.on_scroll_begin_drag(&mut SceneCx::new(&mut ctx, &mut anim));
        assert!(!anim.is_running(AnimationTarget::SnapDebounce(0)));
        assert!(s.need_snap());
    }

    #[test]
    fn touching_tabs_blocks_snap() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        ctx.set_touching_tabs(true);
        s.on_scroll_end_drag(&mut SceneCx::new(&mut ctx, &mut anim));
        assert!(s.need_snap());
        assert!(!anim.is_running(AnimationTarget::SnapDebounce(0)));
    }

    // ── Initial position ─────────────────────────────────────────────

    #[test]
    fn content_size_syncs_once_tall_enough() {
        let (mut ctx, mut anim) = setup();
        ctx.set_container_height(500.0);
        ctx.write_shared(70.0);
        let (mut s, view) = scene(&mut ctx, &mut anim, 1);
        assert_eq!(s.opacity(), 0.0);

        s.on_content_size_change(&mut SceneCx::new(&mut ctx, &mut anim), 300.0);
        assert!(!s.position_synced());

        s.on_content_size_change(&mut SceneCx::new(&mut ctx, &mut anim), 599.5);
        assert!(s.position_synced());
        assert_eq!(s.opacity(), 1.0);
        assert_eq!(view.last_offset(), Some(70.0));
    }

    #[test]
    fn content_size_sync_subtracts_refresh_height() {
        let (mut ctx, mut anim) = setup();
        ctx.set_container_height(500.0);
        let (mut s, view) = scene(&mut ctx, &mut anim, 1);
        s.start_refresh(&mut SceneCx::new(&mut ctx, &mut anim));
        ctx.write_shared(90.0);

        s.on_content_size_change(&mut SceneCx::new(&mut ctx, &mut anim), 2000.0);
        assert!(s.position_synced());
        assert_eq!(view.last_offset(), Some(30.0));
    }

    #[test]
    fn content_size_before_container_layout_syncs_later() {
        let (mut ctx, mut anim) = setup();
        let (mut s, view) = scene(&mut ctx, &mut anim, 0);
        s.on_content_size_change(&mut SceneCx::new(&mut ctx, &mut anim), 2000.0);
        assert!(!s.position_synced());

        ctx.set_container_height(500.0);
        assert!(s.try_sync_initial_position(&mut SceneCx::new(&mut ctx, &mut anim)));
        assert_eq!(s.opacity(), 1.0);
        assert_eq!(view.last_offset(), Some(0.0));
        assert!(!s.try_sync_initial_position(&mut SceneCx::new(&mut ctx, &mut anim)));
    }

    #[test]
    fn content_size_without_view_syncs_on_attach() {
        let (mut ctx, mut anim) = setup();
        ctx.set_container_height(500.0);
        let mut s = SceneController::new(SceneProps::new(0), ctx.config());
        s.on_content_size_change(&mut SceneCx::new(&mut ctx, &mut anim), 2000.0);
        assert!(!s.position_synced());

        let view = RecordingView::new();
        s.attach_view(&mut SceneCx::new(&mut ctx, &mut anim), Box::new(view.clone()));
        assert!(s.position_synced());
        assert_eq!(view.last_offset(), Some(0.0));
    }

    #[test]
    fn momentum_holds_snap_until_it_ends() {
        let (mut ctx, mut anim) = setup();
        let (mut s, _) = scene(&mut ctx, &mut anim, 0);
        s.on_scroll_end_drag(&mut SceneCx::new(&mut ctx, &mut anim));
        s.on_momentum_begin(&mut SceneCx::new(&mut ctx, &mut anim));
        assert!(s.is_losing_momentum());
        s.on_scroll(&mut SceneCx::new(&mut ctx, &mut anim), 70.0);
        assert!(!anim.is_running(AnimationTarget::SnapDebounce(0)));

        s.on_momentum_end(&mut SceneCx::new(&mut ctx, &mut anim));
        assert!(anim.is_running(AnimationTarget::SnapDebounce(0)));
    }
}
