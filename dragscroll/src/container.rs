//! In-memory scroll container.
//!
//! `Container` is a self-contained [`DragHost`]: it owns its geometry,
//! markers, text selection and a small tree of child nodes. Terminal hosts
//! render from it; tests drive it directly.

use std::collections::HashSet;

use unicode_width::UnicodeWidthStr;

use crate::host::DragHost;
use crate::layout::Rect;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// A child element inside a container.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub id: String,
    pub markers: HashSet<String>,
    /// Horizontal extent (start, width) in content coordinates.
    /// A node without a span covers its parent's extent.
    pub span: Option<(u16, u16)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn marker(mut self, name: impl Into<String>) -> Self {
        self.markers.insert(name.into());
        self
    }

    pub fn span(mut self, start: u16, width: u16) -> Self {
        self.span = Some((start, width));
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn covers(&self, content_x: u16) -> bool {
        match self.span {
            Some((start, width)) => {
                content_x >= start && (content_x as u32) < start as u32 + width as u32
            }
            None => true,
        }
    }
}

/// A horizontally scrollable container.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub id: String,
    bounds: Rect,
    content_width: u16,
    scroll_left: u16,
    markers: HashSet<String>,
    selection: Option<String>,
    children: Vec<Node>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    // Builders

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn content(mut self, width: u16) -> Self {
        self.content_width = width;
        self
    }

    /// Size the content to the display width of `text`.
    pub fn text_content(mut self, text: &str) -> Self {
        self.content_width = display_width(text);
        self
    }

    pub fn scrolled_to(mut self, x: u16) -> Self {
        self.set_scroll_left(x);
        self
    }

    pub fn marker(mut self, name: impl Into<String>) -> Self {
        self.markers.insert(name.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    // Accessors

    pub fn rect(&self) -> Rect {
        self.bounds
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    // Mutation

    /// Change the visible width (e.g. after a window resize).
    pub fn resize(&mut self, width: u16) {
        self.bounds = self.bounds.with_width(width);
        self.clamp_scroll();
    }

    pub fn set_content_width(&mut self, width: u16) {
        self.content_width = width;
        self.clamp_scroll();
    }

    pub fn select(&mut self, text: impl Into<String>) {
        self.selection = Some(text.into());
    }

    fn clamp_scroll(&mut self) {
        self.scroll_left = self.scroll_left.min(self.max_scroll_left());
    }

    /// Find the deepest node at the given screen coordinates.
    /// Returns the container's own id when no child covers the point,
    /// and None outside the container.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<String> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let content_x = (x - self.bounds.x).saturating_add(self.scroll_left);

        hit_test_nodes(&self.children, content_x).or_else(|| Some(self.id.clone()))
    }
}

fn hit_test_nodes(nodes: &[Node], content_x: u16) -> Option<String> {
    // Check children in reverse order (last rendered = on top)
    for node in nodes.iter().rev() {
        if !node.covers(content_x) {
            continue;
        }
        return hit_test_nodes(&node.children, content_x).or_else(|| Some(node.id.clone()));
    }
    None
}

/// Collect the chain of nodes from the top level down to `id`.
fn path_to<'a>(nodes: &'a [Node], id: &str, path: &mut Vec<&'a Node>) -> bool {
    for node in nodes {
        path.push(node);
        if node.id == id || path_to(&node.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

impl DragHost for Container {
    fn offset_left(&self) -> u16 {
        self.bounds.x
    }

    fn scroll_left(&self) -> u16 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, x: u16) {
        self.scroll_left = x.min(self.max_scroll_left());
    }

    fn content_width(&self) -> u16 {
        self.content_width
    }

    fn viewport_width(&self) -> u16 {
        self.bounds.width
    }

    fn add_marker(&mut self, name: &str) {
        self.markers.insert(name.to_string());
    }

    fn remove_marker(&mut self, name: &str) {
        self.markers.remove(name);
    }

    fn has_marker(&self, name: &str) -> bool {
        self.markers.contains(name)
    }

    fn is_excluded(&self, target: &str, marker: &str) -> bool {
        if target == self.id {
            return self.markers.contains(marker);
        }

        let mut path = Vec::new();
        if !path_to(&self.children, target, &mut path) {
            return false;
        }

        self.markers.contains(marker) || path.iter().any(|node| node.markers.contains(marker))
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }
}
