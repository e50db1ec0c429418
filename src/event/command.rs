//! Imperative handle for driving a tab view from outside.
//!
//! [`TabViewHandle`] is cheap to clone and can live anywhere the bus reaches.
//! Commands become [`BusEvent`]s tagged with the handle's component id.

use super::bus::{BusEvent, ComponentId, EventBus, IgnoreScrollKind};

/// Parameters of `scroll_to_top` / `scroll_to_tab_bar`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollParams {
    pub animated: bool,
    /// Target scene. `None` means the active one.
    pub index: Option<usize>,
}

impl ScrollParams {
    pub fn animated() -> Self {
        Self {
            animated: true,
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Parameters of `scroll_to_offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetParams {
    pub offset: f64,
    pub animated: bool,
    pub index: Option<usize>,
}

impl OffsetParams {
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Sends commands to one tab view over the bus.
#[derive(Debug, Clone)]
pub struct TabViewHandle {
    component_id: ComponentId,
    bus: EventBus,
    animation_enabled: bool,
}

impl TabViewHandle {
    pub fn new(component_id: impl Into<ComponentId>, bus: EventBus) -> Self {
        Self {
            component_id: component_id.into(),
            bus,
            animation_enabled: true,
        }
    }

    /// Match the tab view's page-change animation setting (builder).
    /// Tab presses are only announced when page changes animate.
    pub fn with_animation_enabled(mut self, enabled: bool) -> Self {
        self.animation_enabled = enabled;
        self
    }

    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    pub fn scroll_to_top(&self, params: ScrollParams) -> usize {
        self.bus.emit(BusEvent::ScrollToTop {
            component_id: self.component_id.clone(),
            params,
        })
    }

    pub fn scroll_to_tab_bar(&self, params: ScrollParams) -> usize {
        self.bus.emit(BusEvent::ScrollToTabBar {
            component_id: self.component_id.clone(),
            params,
        })
    }

    pub fn scroll_to_offset(&self, params: OffsetParams) -> usize {
        self.bus.emit(BusEvent::ScrollToOffset {
            component_id: self.component_id.clone(),
            params,
        })
    }

    /// Announce a tab press. Returns 0 without emitting when page changes
    /// do not animate.
    pub fn tab_pressed(&self) -> usize {
        if !self.animation_enabled {
            return 0;
        }
        self.ignore(IgnoreScrollKind::TabPressed)
    }

    pub fn swipe_start(&self) -> usize {
        self.ignore(IgnoreScrollKind::SwipeStart)
    }

    pub fn swipe_end(&self) -> usize {
        self.ignore(IgnoreScrollKind::SwipeEnd)
    }

    fn ignore(&self, kind: IgnoreScrollKind) -> usize {
        self.bus.emit(BusEvent::IgnoreScrollEnable {
            component_id: self.component_id.clone(),
            kind,
        })
    }
}
