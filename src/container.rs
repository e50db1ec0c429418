//! Tab view: the gesture container that owns every scene of one collapsible
//! tab component.
//!
//! [`TabView`] ties together the shared context, the scene registry, the
//! animator, and an optional bus receiver. Every public entry point applies
//! its state change and then flushes the reactor queue, so callers always
//! observe a settled state.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use crate::animation::{AnimationTarget, Animator};
use crate::config::CollapseConfig;
use crate::context::{HeaderLayout, SharedContext};
use crate::error::Result;
use crate::event::{BusEvent, ComponentId, EventBus, IgnoreScrollKind, OffsetParams, ScrollParams};
use crate::reactive::{Notification, MAX_FLUSH_ROUNDS};
use crate::scene::layout::{bounces_enabled, content_translation, sticky_header_offset};
use crate::scene::{
    ListProps, PullOutcome, SceneController, SceneCx, SceneProps, SceneRegistry, ScrollableView,
    SCROLL_EVENT_THROTTLE,
};

// ---------------------------------------------------------------------------
// TabView
// ---------------------------------------------------------------------------

/// Headless collapsible tab view.
#[derive(Debug)]
pub struct TabView {
    component_id: ComponentId,
    ctx: SharedContext,
    scenes: SceneRegistry,
    animator: Animator,
    bus: Option<broadcast::Receiver<BusEvent>>,
    tab_press_pending: bool,
}

impl TabView {
    /// Create a tab view. Fails if the config does not validate.
    pub fn new(component_id: impl Into<ComponentId>, config: CollapseConfig) -> Result<Self> {
        config.validate()?;
        let component_id = component_id.into();
        info!(component = %component_id, "tab view created");
        Ok(Self {
            component_id,
            ctx: SharedContext::new(config, 0),
            scenes: SceneRegistry::new(),
            animator: Animator::new(),
            bus: None,
            tab_press_pending: false,
        })
    }

    /// Start on a page other than 0 (builder). Scenes already mounted pick
    /// up the new active index.
    pub fn with_initial_page(mut self, index: usize) -> Self {
        self.batch(|tv| tv.ctx.set_active_index(index));
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    pub fn config(&self) -> &CollapseConfig {
        self.ctx.config()
    }

    pub fn context(&self) -> &SharedContext {
        &self.ctx
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Header collapse in `[0, header_height]`.
    pub fn collapse(&self) -> f64 {
        self.ctx.collapse()
    }

    /// Raw shared value.
    pub fn shared_offset(&self) -> f64 {
        self.ctx.shared_offset()
    }

    pub fn active_index(&self) -> usize {
        self.ctx.active_index()
    }

    pub fn header_layout(&self) -> HeaderLayout {
        self.ctx.header_layout()
    }

    /// Observe the raw shared value.
    pub fn subscribe_collapse(&self) -> watch::Receiver<f64> {
        self.ctx.subscribe_shared()
    }

    /// Observe the active tab index.
    pub fn subscribe_active_index(&self) -> watch::Receiver<usize> {
        self.ctx.subscribe_active_index()
    }

    pub fn has_scene(&self, index: usize) -> bool {
        self.scenes.contains(index)
    }

    pub fn scene(&self, index: usize) -> Option<&SceneController> {
        self.scenes.get(index)
    }

    pub fn scene_indices(&self) -> Vec<usize> {
        self.scenes.indices()
    }

    /// Nothing animating and nothing queued.
    pub fn is_idle(&self) -> bool {
        self.animator.is_empty() && self.ctx.pending_notifications() == 0
    }

    // ── Scene lifecycle ──────────────────────────────────────────────

    /// Mount a scene, optionally with its view. A scene already mounted at
    /// the same index is replaced.
    pub fn mount_scene(&mut self, props: SceneProps, view: Option<Box<dyn ScrollableView>>) -> usize {
        let index = props.index;
        let refreshing = props.is_refreshing;
        let scene = SceneController::new(props, self.ctx.config());
        if self.scenes.insert(scene).is_some() {
            warn!(scene = index, "scene remounted; previous controller dropped");
            self.animator.cancel_scene(index);
        }
        debug!(scene = index, "scene mounted");
        self.batch(|tv| {
            tv.with_scene(index, |scene, cx| {
                if let Some(view) = view {
                    scene.attach_view(cx, view);
                }
                scene.set_refreshing(cx, refreshing);
            });
        });
        index
    }

    /// Bind a view to a mounted scene.
    pub fn attach_view(&mut self, index: usize, view: Box<dyn ScrollableView>) -> bool {
        if !self.has_scene(index) {
            warn!(scene = index, "view attached to unmounted scene");
            return false;
        }
        self.dispatch(index, |scene, cx| scene.attach_view(cx, view))
            .is_some()
    }

    /// Unmount a scene and cancel its animations.
    pub fn unmount_scene(&mut self, index: usize) -> bool {
        self.animator.cancel_scene(index);
        let removed = self.scenes.remove(index).is_some();
        if removed {
            debug!(scene = index, "scene unmounted");
        }
        removed
    }

    // ── Native list events ───────────────────────────────────────────

    pub fn on_scroll(&mut self, index: usize, y: f64) {
        self.dispatch(index, |scene, cx| scene.on_scroll(cx, y));
    }

    pub fn on_scroll_begin_drag(&mut self, index: usize) {
        self.dispatch(index, |scene, cx| scene.on_scroll_begin_drag(cx));
    }

    pub fn on_scroll_end_drag(&mut self, index: usize) {
        self.dispatch(index, |scene, cx| scene.on_scroll_end_drag(cx));
    }

    pub fn on_momentum_begin(&mut self, index: usize) {
        self.dispatch(index, |scene, cx| scene.on_momentum_begin(cx));
    }

    pub fn on_momentum_end(&mut self, index: usize) {
        self.dispatch(index, |scene, cx| scene.on_momentum_end(cx));
    }

    pub fn on_content_size_change(&mut self, index: usize, _width: f64, height: f64) {
        self.dispatch(index, |scene, cx| scene.on_content_size_change(cx, height));
    }

    // ── Layout measurements ──────────────────────────────────────────

    /// Record the container height and retry the initial position sync of
    /// every scene whose content was measured first.
    pub fn on_container_layout(&mut self, height: f64) {
        self.batch(|tv| {
            tv.ctx.set_container_height(height);
            for index in tv.scenes.indices() {
                tv.with_scene(index, |scene, cx| scene.try_sync_initial_position(cx));
            }
        });
    }

    pub fn on_sticky_header_layout(&mut self, index: usize, height: f64) {
        if let Some(scene) = self.scenes.get_mut(index) {
            if scene.measurements_mut().set_sticky_header_height(height) {
                debug!(scene = index, height, "sticky header measured");
            }
        }
    }

    pub fn on_list_layout(&mut self, index: usize, height: f64) {
        if let Some(scene) = self.scenes.get_mut(index) {
            scene.measurements_mut().set_list_height(height);
        }
    }

    pub fn on_item_layout(&mut self, index: usize, height: f64) {
        if let Some(scene) = self.scenes.get_mut(index) {
            scene.measurements_mut().set_item_height(height);
        }
    }

    pub fn set_item_count(&mut self, index: usize, count: usize) {
        if let Some(scene) = self.scenes.get_mut(index) {
            scene.measurements_mut().item_count = count;
        }
    }

    /// Props the host list must use for scene `index`.
    pub fn list_props(&self, index: usize) -> Option<ListProps> {
        let scene = self.scenes.get(index)?;
        let config = self.ctx.config();
        let m = scene.measurements();
        Some(ListProps {
            scroll_event_throttle: SCROLL_EVENT_THROTTLE,
            directional_lock_enabled: true,
            bounces: bounces_enabled(
                config.native_bounces,
                config.tabs_refresh_enabled,
                scene.can_pull_refresh(),
            ),
            header_spacer: m.header_spacer(config.calc_height()),
            footer_spacer: m.footer_spacer(config.tabbar_height, config.floating_button_height),
            empty_spacer: m.empty_spacer(config.tabbar_height),
            indicator_inset_top: config.calc_height(),
        })
    }

    /// Where scene `index` places its sticky header.
    pub fn sticky_header_offset(&self, index: usize) -> Option<f64> {
        let scene = self.scenes.get(index)?;
        let config = self.ctx.config();
        Some(sticky_header_offset(
            scene.real_offset(),
            config.header_height,
            config.tabbar_height,
        ))
    }

    /// How far scene `index` translates its content for the refresh control.
    pub fn content_translation(&self, index: usize) -> Option<f64> {
        let scene = self.scenes.get(index)?;
        let config = self.ctx.config();
        Some(content_translation(
            scene.refresh().reveal(),
            config.refresh_height,
            config.overflow_pull,
            config.pull_extended_coefficient,
        ))
    }

    // ── Refresh ──────────────────────────────────────────────────────

    pub fn begin_pull(&mut self, index: usize) -> bool {
        self.dispatch(index, |scene, cx| scene.begin_pull(cx))
            .unwrap_or(false)
    }

    pub fn pull_to(&mut self, index: usize, distance: f64) -> bool {
        self.scenes
            .get_mut(index)
            .is_some_and(|scene| scene.pull_to(distance))
    }

    pub fn end_pull(&mut self, index: usize) -> PullOutcome {
        self.dispatch(index, |scene, cx| scene.end_pull(cx))
            .unwrap_or(PullOutcome::Ignored)
    }

    /// Apply the host's controlled refresh flag for scene `index`.
    pub fn set_refreshing(&mut self, index: usize, refreshing: bool) {
        self.dispatch(index, |scene, cx| scene.set_refreshing(cx, refreshing));
    }

    // ── Tabs ─────────────────────────────────────────────────────────

    /// The pager settled on `index`.
    pub fn set_current_index(&mut self, index: usize) {
        self.batch(|tv| {
            tv.sync_inactive_scenes();
            tv.ctx.set_active_index(index);
            tv.tab_press_pending = false;
            tv.ctx.set_tabs_working(false);
        });
    }

    /// A tab was pressed. Ignored when page changes do not animate.
    pub fn on_tab_press(&mut self) {
        if !self.ctx.config().animation_enabled {
            return;
        }
        self.tab_press_pending = true;
        self.batch(Self::begin_tab_switch);
    }

    pub fn on_swipe_start(&mut self) {
        self.batch(Self::begin_tab_switch);
    }

    pub fn on_swipe_end(&mut self) {
        self.batch(|tv| tv.ctx.set_tabs_working(false));
    }

    pub fn set_touching_tabs(&mut self, touching: bool) {
        self.batch(|tv| tv.ctx.set_touching_tabs(touching));
    }

    pub fn set_sliding_header(&mut self, sliding: bool) {
        self.batch(|tv| tv.ctx.set_sliding_header(sliding));
    }

    fn begin_tab_switch(&mut self) {
        self.sync_inactive_scenes();
        self.ctx.set_tabs_working(true);
    }

    /// Align every idle inactive scene with the header.
    fn sync_inactive_scenes(&mut self) {
        let active = self.ctx.active_index();
        let shared = self.ctx.shared_offset();
        let limit = self.ctx.config().collapse_limit();
        for scene in self.scenes.iter_mut() {
            if scene.index() == active || scene.refresh().is_busy() {
                continue;
            }
            if shared < limit {
                scene.sync_to(shared.max(0.0));
            } else if scene.offset() < limit {
                scene.sync_to(limit);
            }
        }
        trace!(active, shared, "inactive scenes synced");
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn scroll_to_top(&mut self, params: ScrollParams) -> bool {
        self.scroll_scene(params.index, 0.0, params.animated)
    }

    /// Scroll so the header is fully collapsed and the tab bar rests on top.
    pub fn scroll_to_tab_bar(&mut self, params: ScrollParams) -> bool {
        let limit = self.ctx.config().collapse_limit();
        self.scroll_scene(params.index, limit, params.animated)
    }

    pub fn scroll_to_offset(&mut self, params: OffsetParams) -> bool {
        self.scroll_scene(params.index, params.offset, params.animated)
    }

    fn scroll_scene(&mut self, index: Option<usize>, offset: f64, animated: bool) -> bool {
        let index = index.unwrap_or_else(|| self.ctx.active_index());
        self.dispatch(index, |scene, cx| scene.scroll_to(cx, offset, animated))
            .unwrap_or(false)
    }

    // ── Bus ──────────────────────────────────────────────────────────

    /// Subscribe to `bus`. Events are processed by [`TabView::pump_bus`].
    pub fn attach_bus(&mut self, bus: &EventBus) {
        self.bus = Some(bus.subscribe());
    }

    /// Handle one bus event. Events for other components are ignored.
    pub fn handle_bus_event(&mut self, event: &BusEvent) -> bool {
        if event.component_id() != &self.component_id {
            trace!(event = event.name(), "bus event for another component");
            return false;
        }
        debug!(event = event.name(), component = %self.component_id, "bus event");
        match event {
            BusEvent::IgnoreScrollEnable { kind, .. } => match kind {
                IgnoreScrollKind::TabPressed => self.on_tab_press(),
                IgnoreScrollKind::SwipeStart => self.on_swipe_start(),
                IgnoreScrollKind::SwipeEnd => self.on_swipe_end(),
            },
            BusEvent::ScrollToTop { params, .. } => {
                self.scroll_to_top(*params);
            }
            BusEvent::ScrollToOffset { params, .. } => {
                self.scroll_to_offset(*params);
            }
            BusEvent::ScrollToTabBar { params, .. } => {
                self.scroll_to_tab_bar(*params);
            }
        }
        true
    }

    /// Drain pending bus events. Returns how many were handled.
    pub fn pump_bus(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let next = match self.bus.as_mut() {
                Some(rx) => rx.try_recv(),
                None => break,
            };
            match next {
                Ok(event) => {
                    if self.handle_bus_event(&event) {
                        handled += 1;
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => break,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, component = %self.component_id, "bus receiver lagged");
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    debug!(component = %self.component_id, "bus closed");
                    self.bus = None;
                    break;
                }
            }
        }
        handled
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Advance animations by `dt`, apply their frames, and react to
    /// completions.
    pub fn tick(&mut self, dt: Duration) {
        let out = self.animator.tick(dt);
        if out.frames.is_empty() && out.ends.is_empty() {
            return;
        }
        self.batch(|tv| {
            for frame in &out.frames {
                let current = tv.animator.id_of(frame.target) == Some(frame.id);
                let ended_now = out.ends.iter().any(|end| end.id == frame.id);
                if !current && !ended_now {
                    continue;
                }
                tv.with_scene(frame.target.scene(), |scene, cx| scene.apply_frame(cx, frame));
            }
            for end in out.ends {
                tv.ctx.reactor().notify(Notification::AnimationEnded(end));
            }
        });
    }

    // ── Reactions ────────────────────────────────────────────────────

    /// Run `f` with flushing deferred until the outermost batch closes.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.ctx.reactor().begin_batch();
        let result = f(self);
        if self.ctx.reactor().end_batch() {
            self.flush();
        }
        result
    }

    /// Process queued notifications in FIFO order.
    pub fn flush(&mut self) {
        if self.ctx.reactor().is_batching() || !self.ctx.reactor().enter_flush() {
            return;
        }
        let mut rounds = 0;
        while let Some(notification) = self.ctx.reactor().pop() {
            rounds += 1;
            if rounds > MAX_FLUSH_ROUNDS {
                let dropped = self.ctx.reactor().drain().len() + 1;
                warn!(dropped, "reaction loop exceeded round limit");
                break;
            }
            self.react(notification);
        }
        self.ctx.reactor().exit_flush();
    }

    fn react(&mut self, notification: Notification) {
        trace!(?notification, "react");
        match notification {
            Notification::ActiveTabChanged { previous, .. } => {
                self.with_scene(previous, |scene, cx| scene.cancel_snap(cx));
                self.update_all_scroll_enabled();
            }
            Notification::TabsWorkingChanged(working) => {
                self.update_all_scroll_enabled();
                if !working {
                    self.with_active_scene(|scene, cx| scene.try_snap(cx));
                }
            }
            Notification::TouchingTabsChanged(active) | Notification::SlidingHeaderChanged(active) => {
                self.with_active_scene(|scene, cx| {
                    if active {
                        scene.cancel_snap(cx);
                    } else {
                        scene.request_snap(cx);
                    }
                });
            }
            Notification::SceneStateChanged(index) => {
                self.with_scene(index, |scene, cx| scene.update_scroll_enabled(cx));
            }
            Notification::AnimationEnded(end) => {
                if end.finished && self.animator.is_running(end.target) {
                    trace!(target = ?end.target, "completion superseded by a newer animation");
                    return;
                }
                self.with_scene(end.target.scene(), |scene, cx| scene.on_animation_end(cx, &end));
            }
        }
    }

    fn update_all_scroll_enabled(&mut self) {
        for index in self.scenes.indices() {
            self.with_scene(index, |scene, cx| scene.update_scroll_enabled(cx));
        }
    }

    // ── Scene access ─────────────────────────────────────────────────

    fn with_scene<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut SceneController, &mut SceneCx<'_>) -> R,
    ) -> Option<R> {
        let Some(scene) = self.scenes.get_mut(index) else {
            debug!(scene = index, "no scene mounted at index");
            return None;
        };
        let mut cx = SceneCx::new(&mut self.ctx, &mut self.animator);
        Some(f(scene, &mut cx))
    }

    fn with_active_scene<R>(
        &mut self,
        f: impl FnOnce(&mut SceneController, &mut SceneCx<'_>) -> R,
    ) -> Option<R> {
        let active = self.ctx.active_index();
        self.with_scene(active, f)
    }

    /// `with_scene` followed by a flush.
    fn dispatch<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut SceneController, &mut SceneCx<'_>) -> R,
    ) -> Option<R> {
        let result = self.with_scene(index, f);
        self.flush();
        result
    }

    /// Whether an animation currently drives `target`.
    pub fn is_animating(&self, target: AnimationTarget) -> bool {
        self.animator.is_running(target)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RefreshPhase;
    use crate::testing::{RecordingView, ViewCall};

    fn config() -> CollapseConfig {
        CollapseConfig::new()
            .with_header_height(100.0)
            .with_tabbar_height(40.0)
            .with_refresh_height(60.0)
            .with_snap(true)
    }

    fn tab_view(tabs: usize) -> (TabView, Vec<RecordingView>) {
        let mut tv = TabView::new("tabs", config()).unwrap();
        let views: Vec<RecordingView> = (0..tabs).map(|_| RecordingView::new()).collect();
        for (i, view) in views.iter().enumerate() {
            tv.mount_scene(SceneProps::new(i).with_refresh(|| {}), Some(Box::new(view.clone())));
        }
        (tv, views)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = TabView::new("x", CollapseConfig::new().with_header_height(-1.0));
        assert!(err.is_err());
    }

    #[test]
    fn initial_page_is_active() {
        let tv = TabView::new("x", config()).unwrap().with_initial_page(2);
        assert_eq!(tv.active_index(), 2);
    }

    // ── Activation ───────────────────────────────────────────────────

    #[test]
    fn only_active_scene_may_scroll() {
        let (_tv, views) = tab_view(3);
        assert_eq!(views[0].scroll_enabled(), Some(true));
        assert_eq!(views[1].scroll_enabled(), Some(false));
        assert_eq!(views[2].scroll_enabled(), Some(false));
    }

    #[test]
    fn switching_tabs_moves_scroll_enabled() {
        let (mut tv, views) = tab_view(2);
        tv.set_current_index(1);
        assert_eq!(views[0].scroll_enabled(), Some(false));
        assert_eq!(views[1].scroll_enabled(), Some(true));
    }

    #[test]
    fn tab_press_disables_scrolling_until_index_settles() {
        let (mut tv, views) = tab_view(2);
        tv.on_tab_press();
        assert!(tv.context().tabs_working());
        assert_eq!(views[0].scroll_enabled(), Some(false));
        tv.set_current_index(1);
        assert!(!tv.context().tabs_working());
        assert_eq!(views[1].scroll_enabled(), Some(true));
    }

    #[test]
    fn tab_press_ignored_without_animation() {
        let mut tv = TabView::new("x", config().with_animation_enabled(false)).unwrap();
        tv.on_tab_press();
        assert!(!tv.context().tabs_working());
    }

    #[test]
    fn swipe_syncs_inactive_scenes() {
        let (mut tv, views) = tab_view(3);
        tv.on_scroll(0, 40.0);
        tv.on_swipe_start();
        assert_eq!(views[1].last_offset(), Some(40.0));
        assert_eq!(views[2].last_offset(), Some(40.0));
        assert_eq!(views[0].last_offset(), None);
        tv.on_swipe_end();
        assert!(!tv.context().tabs_working());
    }

    #[test]
    fn collapsed_header_only_moves_scenes_above_limit() {
        let (mut tv, views) = tab_view(2);
        tv.on_scroll(1, 300.0);
        tv.on_scroll(0, 500.0);
        tv.on_swipe_start();
        // Scene 1 already scrolled past the collapse limit: left alone.
        assert_eq!(views[1].last_offset(), None);

        let (mut tv, views) = tab_view(2);
        tv.on_scroll(0, 500.0);
        tv.on_swipe_start();
        assert_eq!(views[1].last_offset(), Some(100.0));
    }

    // ── Commands ─────────────────────────────────────────────────────

    #[test]
    fn scroll_to_tab_bar_targets_collapse_limit() {
        let (mut tv, views) = tab_view(2);
        assert!(tv.scroll_to_tab_bar(ScrollParams::default()));
        assert_eq!(views[0].last_offset(), Some(100.0));
        assert_eq!(tv.collapse(), 100.0);
    }

    #[test]
    fn scroll_command_to_missing_scene_is_noop() {
        let (mut tv, _) = tab_view(1);
        assert!(!tv.scroll_to_top(ScrollParams::default().with_index(7)));
    }

    #[test]
    fn bus_events_filtered_by_component() {
        let bus = EventBus::new();
        let (mut tv, views) = tab_view(2);
        tv.attach_bus(&bus);
        bus.emit(BusEvent::ScrollToOffset {
            component_id: "other".into(),
            params: OffsetParams::new(50.0),
        });
        bus.emit(BusEvent::ScrollToOffset {
            component_id: "tabs".into(),
            params: OffsetParams::new(30.0).with_index(1),
        });
        assert_eq!(tv.pump_bus(), 1);
        assert_eq!(views[1].last_offset(), Some(30.0));
        assert_eq!(views[0].last_offset(), None);
    }

    #[test]
    fn closed_bus_is_dropped() {
        let bus = EventBus::new();
        let (mut tv, _) = tab_view(1);
        tv.attach_bus(&bus);
        drop(bus);
        assert_eq!(tv.pump_bus(), 0);
        assert_eq!(tv.pump_bus(), 0);
    }

    // ── Refresh ──────────────────────────────────────────────────────

    #[test]
    fn pull_trigger_invokes_callback_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut tv = TabView::new("x", config()).unwrap();
        let view = RecordingView::new();
        tv.mount_scene(
            SceneProps::new(0).with_refresh(move || counter.set(counter.get() + 1)),
            Some(Box::new(view.clone())),
        );
        assert!(tv.begin_pull(0));
        assert_eq!(view.scroll_enabled(), Some(false));
        tv.pull_to(0, 90.0);
        assert_eq!(tv.content_translation(0), Some(90.0));
        assert_eq!(tv.end_pull(0), PullOutcome::Triggered);
        tv.set_refreshing(0, true);
        assert_eq!(calls.get(), 1);
        assert_eq!(tv.scene(0).unwrap().refresh_phase(), RefreshPhase::AnimatingIn);

        tv.tick(Duration::from_millis(400));
        assert_eq!(tv.scene(0).unwrap().refresh_phase(), RefreshPhase::Held);
        tv.set_refreshing(0, false);
        tv.tick(Duration::from_millis(400));
        assert_eq!(tv.scene(0).unwrap().refresh_phase(), RefreshPhase::Idle);
        assert_eq!(view.scroll_enabled(), Some(true));
    }

    #[test]
    fn unmount_cancels_animations() {
        let (mut tv, _) = tab_view(1);
        tv.set_refreshing(0, true);
        assert!(tv.is_animating(AnimationTarget::RefreshTrack(0)));
        assert!(tv.unmount_scene(0));
        assert!(tv.animator().is_empty());
        assert!(tv.scene(0).is_none());
    }

    // ── Layout ───────────────────────────────────────────────────────

    #[test]
    fn list_props_reflect_measurements() {
        let (mut tv, _) = tab_view(1);
        tv.on_sticky_header_layout(0, 30.0);
        tv.on_list_layout(0, 600.0);
        tv.on_item_layout(0, 50.0);
        tv.set_item_count(0, 4);
        let props = tv.list_props(0).unwrap();
        assert_eq!(props.scroll_event_throttle, 16);
        assert!(props.directional_lock_enabled);
        assert!(!props.bounces);
        assert_eq!(props.header_spacer, 170.0);
        // 600 - 40 - 30 - 4 * 50
        assert_eq!(props.footer_spacer, 330.0);
        assert_eq!(props.indicator_inset_top, 140.0);
    }

    #[test]
    fn sticky_header_follows_real_offset() {
        let (mut tv, _) = tab_view(1);
        tv.on_scroll(0, 30.0);
        assert_eq!(tv.sticky_header_offset(0), Some(110.0));
    }

    #[test]
    fn initial_page_after_mount_moves_scroll_enabled() {
        let (tv, views) = tab_view(2);
        let tv = tv.with_initial_page(1);
        assert_eq!(tv.active_index(), 1);
        assert_eq!(views[0].scroll_enabled(), Some(false));
        assert_eq!(views[1].scroll_enabled(), Some(true));
    }

    #[test]
    fn active_index_observers_see_switch() {
        let (mut tv, _) = tab_view(2);
        let mut rx = tv.subscribe_active_index();
        tv.set_current_index(1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
        tv.set_current_index(1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn content_measured_before_container_syncs_on_layout() {
        let (mut tv, views) = tab_view(1);
        tv.on_content_size_change(0, 320.0, 2000.0);
        assert_eq!(tv.scene(0).unwrap().opacity(), 0.0);

        tv.on_container_layout(500.0);
        let scene = tv.scene(0).unwrap();
        assert!(scene.position_synced());
        assert_eq!(scene.opacity(), 1.0);
        assert_eq!(views[0].last_offset(), Some(0.0));
    }

    #[test]
    fn content_measured_before_view_syncs_on_attach() {
        let mut tv = TabView::new("x", config()).unwrap();
        tv.on_container_layout(500.0);
        tv.mount_scene(SceneProps::new(0), None);
        tv.on_content_size_change(0, 320.0, 2000.0);
        assert!(!tv.scene(0).unwrap().position_synced());

        let view = RecordingView::new();
        assert!(tv.attach_view(0, Box::new(view.clone())));
        assert_eq!(tv.scene(0).unwrap().opacity(), 1.0);
        assert_eq!(view.last_offset(), Some(0.0));
    }

    #[test]
    fn attach_view_to_unmounted_scene_fails() {
        let mut tv = TabView::new("x", config()).unwrap();
        assert!(!tv.has_scene(3));
        assert!(!tv.attach_view(3, Box::new(RecordingView::new())));
    }

    #[test]
    fn scroll_enabled_set_on_attach() {
        let mut tv = TabView::new("x", config()).unwrap();
        tv.mount_scene(SceneProps::new(0), None);
        let view = RecordingView::new();
        assert!(tv.attach_view(0, Box::new(view.clone())));
        assert_eq!(view.calls(), vec![ViewCall::SetScrollEnabled(true)]);
    }
}
