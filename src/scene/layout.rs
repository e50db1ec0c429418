//! Scene layout math: spacers injected around the host list, sticky header
//! placement, and pull distance mapping.

// ---------------------------------------------------------------------------
// SceneMeasurements
// ---------------------------------------------------------------------------

/// Layout measurements reported by the host for one scene.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneMeasurements {
    /// Height of the scene's sticky header (0 if none).
    pub sticky_header_height: f64,
    /// Height of the list viewport.
    pub list_height: f64,
    /// Height of the first measured item.
    pub item_height: f64,
    /// Number of items in the list.
    pub item_count: usize,
    /// Last reported content height.
    pub content_height: f64,
}

impl SceneMeasurements {
    /// Record the sticky header height. Zero heights are ignored.
    pub fn set_sticky_header_height(&mut self, height: f64) -> bool {
        if height > 0.0 && height != self.sticky_header_height {
            self.sticky_header_height = height;
            return true;
        }
        false
    }

    /// Record the list viewport height. Zero heights are ignored.
    pub fn set_list_height(&mut self, height: f64) {
        if height > 0.0 {
            self.list_height = height;
        }
    }

    /// Record the item height. Only the first non-zero measurement counts.
    pub fn set_item_height(&mut self, height: f64) {
        if self.item_height == 0.0 && height > 0.0 {
            self.item_height = height;
        }
    }

    /// Spacer placed above the host's own list header.
    pub fn header_spacer(&self, calc_height: f64) -> f64 {
        calc_height + self.sticky_header_height
    }

    /// Spacer placed below the host's own list footer.
    ///
    /// Short lists are padded so they can still scroll the header away;
    /// otherwise the floating button height is reserved. Empty lists get none.
    pub fn footer_spacer(&self, tabbar_height: f64, floating_button_height: f64) -> f64 {
        if self.item_count == 0 {
            return 0.0;
        }
        let available = self.list_height - tabbar_height - self.sticky_header_height;
        let used = self.item_height * self.item_count as f64;
        if used < available {
            available - used
        } else {
            floating_button_height
        }
    }

    /// Height of the placeholder shown for an empty list.
    pub fn empty_spacer(&self, tabbar_height: f64) -> f64 {
        (self.list_height - tabbar_height).max(0.0)
    }
}

// ---------------------------------------------------------------------------
// ListProps
// ---------------------------------------------------------------------------

/// Props the engine imposes on the host list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListProps {
    pub scroll_event_throttle: u32,
    pub directional_lock_enabled: bool,
    pub bounces: bool,
    pub header_spacer: f64,
    pub footer_spacer: f64,
    pub empty_spacer: f64,
    pub indicator_inset_top: f64,
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Vertical position of a scene's sticky header for a list offset.
///
/// Starts below the header and tab bar and moves up with the content until it
/// rests under the tab bar.
pub fn sticky_header_offset(real_offset: f64, header_height: f64, tabbar_height: f64) -> f64 {
    let calc = header_height + tabbar_height;
    calc - real_offset.clamp(0.0, header_height)
}

/// Content translation for a refresh reveal distance.
///
/// Linear up to `refresh_height + overflow_pull`, then damped by
/// `coefficient` per extra pixel.
pub fn content_translation(
    reveal: f64,
    refresh_height: f64,
    overflow_pull: f64,
    coefficient: f64,
) -> f64 {
    let reveal = reveal.max(0.0);
    let linear_limit = refresh_height + overflow_pull;
    if reveal <= linear_limit {
        reveal
    } else {
        linear_limit + (reveal - linear_limit) * coefficient
    }
}

/// Whether the host list may bounce natively.
pub fn bounces_enabled(native_bounces: bool, tabs_refresh_enabled: bool, can_pull_refresh: bool) -> bool {
    native_bounces && !tabs_refresh_enabled && !can_pull_refresh
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(list: f64, item: f64, count: usize, sticky: f64) -> SceneMeasurements {
        SceneMeasurements {
            sticky_header_height: sticky,
            list_height: list,
            item_height: item,
            item_count: count,
            content_height: 0.0,
        }
    }

    // ── Spacers ──────────────────────────────────────────────────────

    #[test]
    fn header_spacer_includes_sticky() {
        let m = measured(600.0, 50.0, 3, 30.0);
        assert_eq!(m.header_spacer(140.0), 170.0);
    }

    #[test]
    fn footer_pads_short_lists() {
        // 600 - 40 - 0 = 560 available, 3 * 50 = 150 used.
        let m = measured(600.0, 50.0, 3, 0.0);
        assert_eq!(m.footer_spacer(40.0, 20.0), 410.0);
    }

    #[test]
    fn footer_reserves_floating_button_for_long_lists() {
        let m = measured(600.0, 50.0, 40, 0.0);
        assert_eq!(m.footer_spacer(40.0, 20.0), 20.0);
    }

    #[test]
    fn footer_empty_list_is_zero() {
        let m = measured(600.0, 50.0, 0, 0.0);
        assert_eq!(m.footer_spacer(40.0, 20.0), 0.0);
    }

    #[test]
    fn empty_spacer_never_negative() {
        assert_eq!(measured(600.0, 0.0, 0, 0.0).empty_spacer(40.0), 560.0);
        assert_eq!(measured(10.0, 0.0, 0, 0.0).empty_spacer(40.0), 0.0);
    }

    #[test]
    fn measurements_ignore_zero_heights() {
        let mut m = SceneMeasurements::default();
        assert!(!m.set_sticky_header_height(0.0));
        assert!(m.set_sticky_header_height(24.0));
        assert!(!m.set_sticky_header_height(24.0));
        m.set_list_height(0.0);
        assert_eq!(m.list_height, 0.0);
        m.set_item_height(0.0);
        m.set_item_height(44.0);
        m.set_item_height(60.0);
        assert_eq!(m.item_height, 44.0);
    }

    // ── Sticky header ────────────────────────────────────────────────

    #[test]
    fn sticky_header_moves_with_content() {
        assert_eq!(sticky_header_offset(0.0, 100.0, 40.0), 140.0);
        assert_eq!(sticky_header_offset(30.0, 100.0, 40.0), 110.0);
        assert_eq!(sticky_header_offset(500.0, 100.0, 40.0), 40.0);
        assert_eq!(sticky_header_offset(-20.0, 100.0, 40.0), 140.0);
    }

    // ── Pull mapping ─────────────────────────────────────────────────

    #[test]
    fn translation_linear_within_overflow() {
        assert_eq!(content_translation(0.0, 60.0, 40.0, 0.1), 0.0);
        assert_eq!(content_translation(90.0, 60.0, 40.0, 0.1), 90.0);
        assert_eq!(content_translation(-5.0, 60.0, 40.0, 0.1), 0.0);
    }

    #[test]
    fn translation_damped_past_overflow() {
        let t = content_translation(200.0, 60.0, 40.0, 0.1);
        assert!((t - 110.0).abs() < 1e-9);
    }

    #[test]
    fn bounce_rules() {
        assert!(bounces_enabled(true, false, false));
        assert!(!bounces_enabled(false, false, false));
        assert!(!bounces_enabled(true, true, false));
        assert!(!bounces_enabled(true, false, true));
    }
}
