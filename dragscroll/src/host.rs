//! The attachment contract between a drag-scroll behavior and the element
//! it is bound to.

/// A scrollable container a [`DragScroll`](crate::DragScroll) can drive.
///
/// Implementors expose horizontal geometry, a named marker set (class-like
/// flags used for styling), and a way to tell whether an event target sits
/// inside an exclusion region.
pub trait DragHost {
    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Left edge of the container in pointer coordinates.
    fn offset_left(&self) -> u16;

    /// Current horizontal scroll offset.
    fn scroll_left(&self) -> u16;

    /// Set the horizontal scroll offset. The host clamps to its own bounds.
    fn set_scroll_left(&mut self, x: u16);

    /// Total width of the container's content.
    fn content_width(&self) -> u16;

    /// Visible width of the container.
    fn viewport_width(&self) -> u16;

    fn max_scroll_left(&self) -> u16 {
        self.content_width().saturating_sub(self.viewport_width())
    }

    /// True if the content is wider than the visible area.
    fn overflows(&self) -> bool {
        self.content_width() > self.viewport_width()
    }

    // -------------------------------------------------------------------------
    // Markers
    // -------------------------------------------------------------------------

    fn add_marker(&mut self, name: &str);

    fn remove_marker(&mut self, name: &str);

    fn has_marker(&self, name: &str) -> bool;

    /// True if `target`, or any of its ancestors up to and including the
    /// container, carries `marker`.
    fn is_excluded(&self, target: &str, marker: &str) -> bool;

    // -------------------------------------------------------------------------
    // Environment
    // -------------------------------------------------------------------------

    /// Clear any active text selection.
    fn clear_selection(&mut self) {
        // Default: no selection support
    }
}
