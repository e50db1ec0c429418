//! Plain-text dumps of tab view state.

use std::fmt::Write;

use crate::container::TabView;

/// Render the shared value, the active tab, and every scene as one line
/// each. Numbers use `f64`'s `Display` form.
///
/// ```ignore
/// let text = render_state(pilot.tab_view());
/// insta::assert_snapshot!(text, @"...");
/// ```
pub fn render_state(tab_view: &TabView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "shared: {}", tab_view.shared_offset());
    let _ = writeln!(out, "collapse: {}", tab_view.collapse());
    let _ = write!(out, "active: {}", tab_view.active_index());
    for index in tab_view.scene_indices() {
        let Some(scene) = tab_view.scene(index) else {
            continue;
        };
        let enabled = match scene.scroll_enabled() {
            Some(true) => "on",
            Some(false) => "off",
            None => "-",
        };
        let _ = write!(
            out,
            "\nscene {index}: offset {} real {} refresh {:?} scroll {enabled}",
            scene.offset(),
            scene.real_offset(),
            scene.refresh_phase(),
        );
    }
    out
}
