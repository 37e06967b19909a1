//! Section: a padded group of nodes and sections.

use super::tree::TreeNode;
use crate::buffer::View;
use crate::layout::{Padding, Position, Rect, Size};

/// Layout-only container. Holds no text of its own.
#[derive(Debug, Clone, Default)]
pub struct Section {
    id: Option<String>,
    pos: Position,
    size: Size,
    padding: Padding,
    children: Vec<TreeNode>,
}

impl Section {
    /// A full-size, unpadded, empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: lookup id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: position in the parent.
    #[must_use]
    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }

    /// Builder: size in the parent.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Builder: padding around the children.
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Builder: append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<TreeNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: impl Into<TreeNode>) {
        self.children.push(child.into());
    }

    /// Lookup id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Children in paint order.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub(super) fn children_mut(&mut self) -> &mut [TreeNode] {
        &mut self.children
    }

    /// The section's rectangle inside a `width` by `height` parent.
    pub fn rect(&self, width: u16, height: u16) -> Rect {
        Rect::resolve(&self.pos, &self.size, width, height)
    }

    /// Paint every child, in order, into the padded interior.
    pub fn render(&mut self, parent: &mut View<'_>) {
        let rect = self.rect(parent.width(), parent.height());
        let mut view = parent.sub_rect(rect);
        let inner = Rect::from_size(view.width(), view.height()).inset(&self.padding);
        let mut inner = view.sub_rect(inner);
        for child in &mut self.children {
            child.render(&mut inner);
        }
    }
}
