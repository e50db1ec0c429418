//! Construction-time configuration for a tab view.
//!
//! [`CollapseConfig`] mirrors the knobs a host passes when creating a
//! collapsible tab view. It can be built in code with the `with_*` builder
//! methods or loaded from TOML; missing fields fall back to defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::EasingType;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// CollapseConfig
// ---------------------------------------------------------------------------

/// Configuration for one tab-view instance.
///
/// All lengths are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    /// Height of the collapsible header.
    pub header_height: f64,
    /// Height of the tab bar pinned below the header.
    pub tabbar_height: f64,
    /// Bottom part of the header that stays visible when fully collapsed.
    pub froze_top: f64,
    /// Height of the pull-to-refresh control.
    pub refresh_height: f64,
    /// Extra pull distance that still maps 1:1 to content translation.
    pub overflow_pull: f64,
    /// Content translation per pixel pulled past `refresh_height + overflow_pull`.
    pub pull_extended_coefficient: f64,
    /// Whether the header snaps to a resting position after gestures.
    pub enable_snap: bool,
    /// Debounce before a snap fires, in milliseconds.
    pub scrolling_check_duration_ms: u64,
    /// Whether tab presses animate (and suppress scrolling while they do).
    pub animation_enabled: bool,
    /// Duration of refresh and snap animations, in milliseconds.
    pub animation_duration_ms: u64,
    /// Easing curve used by refresh and snap animations.
    pub easing: EasingType,
    /// Whether the tab view itself owns pull-to-refresh for all tabs.
    pub tabs_refresh_enabled: bool,
    /// Whether the host platform supports native bounce overscroll.
    pub native_bounces: bool,
    /// Extra footer space reserved for a floating button.
    pub floating_button_height: f64,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            header_height: 200.0,
            tabbar_height: 48.0,
            froze_top: 0.0,
            refresh_height: 80.0,
            overflow_pull: 50.0,
            pull_extended_coefficient: 0.1,
            enable_snap: false,
            scrolling_check_duration_ms: 50,
            animation_enabled: true,
            animation_duration_ms: 300,
            easing: EasingType::InOutQuad,
            tabs_refresh_enabled: false,
            native_bounces: false,
            floating_button_height: 0.0,
        }
    }
}

impl CollapseConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header height (builder).
    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    /// Set the tab bar height (builder).
    pub fn with_tabbar_height(mut self, height: f64) -> Self {
        self.tabbar_height = height;
        self
    }

    /// Set the frozen header part (builder).
    pub fn with_froze_top(mut self, height: f64) -> Self {
        self.froze_top = height;
        self
    }

    /// Set the refresh control height (builder).
    pub fn with_refresh_height(mut self, height: f64) -> Self {
        self.refresh_height = height;
        self
    }

    /// Set the overflow pull distance (builder).
    pub fn with_overflow_pull(mut self, pull: f64) -> Self {
        self.overflow_pull = pull;
        self
    }

    /// Set the pull extension coefficient (builder).
    pub fn with_pull_extended_coefficient(mut self, coefficient: f64) -> Self {
        self.pull_extended_coefficient = coefficient;
        self
    }

    /// Enable or disable snapping (builder).
    pub fn with_snap(mut self, enabled: bool) -> Self {
        self.enable_snap = enabled;
        self
    }

    /// Set the snap debounce in milliseconds (builder).
    pub fn with_scrolling_check_duration(mut self, ms: u64) -> Self {
        self.scrolling_check_duration_ms = ms;
        self
    }

    /// Enable or disable tab-press animations (builder).
    pub fn with_animation_enabled(mut self, enabled: bool) -> Self {
        self.animation_enabled = enabled;
        self
    }

    /// Set the refresh/snap animation duration in milliseconds (builder).
    pub fn with_animation_duration(mut self, ms: u64) -> Self {
        self.animation_duration_ms = ms;
        self
    }

    /// Set the animation easing (builder).
    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    /// Let the tab view own refresh for every tab (builder).
    pub fn with_tabs_refresh(mut self, enabled: bool) -> Self {
        self.tabs_refresh_enabled = enabled;
        self
    }

    /// Declare native bounce support (builder).
    pub fn with_native_bounces(mut self, bounces: bool) -> Self {
        self.native_bounces = bounces;
        self
    }

    /// Reserve footer space for a floating button (builder).
    pub fn with_floating_button_height(mut self, height: f64) -> Self {
        self.floating_button_height = height;
        self
    }

    // ── Derived values ───────────────────────────────────────────────

    /// Header plus tab bar: the spacer every scene places above its content.
    pub fn calc_height(&self) -> f64 {
        self.header_height + self.tabbar_height
    }

    /// How far the header can collapse before it is fully hidden.
    pub fn collapse_limit(&self) -> f64 {
        (self.header_height - self.froze_top).max(0.0)
    }

    /// Snap debounce as a `Duration`.
    pub fn scrolling_check_duration(&self) -> Duration {
        Duration::from_millis(self.scrolling_check_duration_ms)
    }

    /// Refresh/snap animation duration as a `Duration`.
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    // ── Validation and loading ───────────────────────────────────────

    /// Check that every length is finite and non-negative and that the
    /// frozen part fits inside the header.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("header_height", self.header_height),
            ("tabbar_height", self.tabbar_height),
            ("froze_top", self.froze_top),
            ("refresh_height", self.refresh_height),
            ("overflow_pull", self.overflow_pull),
            ("pull_extended_coefficient", self.pull_extended_coefficient),
            ("floating_button_height", self.floating_button_height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        if self.froze_top > self.header_height {
            return Err(Error::InvalidConfig(format!(
                "froze_top ({}) exceeds header_height ({})",
                self.froze_top, self.header_height
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to a pretty TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
