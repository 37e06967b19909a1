//! Tree: the root of a UI, with focus traversal and command dispatch.

use super::node::{Focus, Node};
use super::section::Section;
use crate::buffer::{Buffer, View};

/// A leaf node or a group of them.
#[derive(Debug, Clone)]
pub enum TreeNode {
    /// Text panel.
    Leaf(Node),
    /// Layout container.
    Group(Section),
}

impl From<Node> for TreeNode {
    fn from(node: Node) -> Self {
        Self::Leaf(node)
    }
}

impl From<Section> for TreeNode {
    fn from(section: Section) -> Self {
        Self::Group(section)
    }
}

impl TreeNode {
    /// Paint this subtree into `parent`.
    pub fn render(&mut self, parent: &mut View<'_>) {
        match self {
            Self::Leaf(node) => node.render(parent),
            Self::Group(section) => section.render(parent),
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match self {
            Self::Leaf(node) => out.push(node),
            Self::Group(section) => section.children().iter().for_each(|c| c.collect(out)),
        }
    }

    fn collect_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Node>) {
        match self {
            Self::Leaf(node) => out.push(node),
            Self::Group(section) => section.children_mut().iter_mut().for_each(|c| c.collect_mut(out)),
        }
    }
}

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous line or entry.
    Up,
    /// Next line or entry.
    Down,
    /// Previous column.
    Left,
    /// Next column.
    Right,
}

/// What a key press asks the tree to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Leave the application.
    Quit,
    /// Nothing.
    Noop,
    /// Focus the next focusable node.
    FocusNext,
    /// Focus the previous focusable node.
    FocusPrev,
    /// Select the focused node.
    Select,
    /// Release the selected node.
    Deselect,
    /// Scroll the focused node.
    Scroll(Direction),
    /// Repaint without other changes.
    Redraw,
}

/// Root container of nodes and sections.
///
/// The focused node is the first leaf, depth first, whose state is
/// [`Focus::Focus`] or [`Focus::Selected`]. Focus follows the node itself,
/// so adding children anywhere keeps it in place.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    children: Vec<TreeNode>,
    selected: bool,
}

impl Tree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a root child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<TreeNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a root child.
    pub fn push(&mut self, child: impl Into<TreeNode>) {
        self.children.push(child.into());
    }

    /// Insert a root child at `index`, or append it past the end.
    pub fn insert(&mut self, index: usize, child: impl Into<TreeNode>) {
        let index = index.min(self.children.len());
        self.children.insert(index, child.into());
    }

    /// Root children.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// True while the focused node is selected.
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Clear `buffer` and paint every child into it, depth first.
    pub fn render(&mut self, buffer: &mut Buffer) {
        buffer.clear();
        let mut view = buffer.view();
        for child in &mut self.children {
            child.render(&mut view);
        }
    }

    fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.children.iter().for_each(|c| c.collect(&mut out));
        out
    }

    fn nodes_mut(&mut self) -> Vec<&mut Node> {
        let mut out = Vec::new();
        self.children.iter_mut().for_each(|c| c.collect_mut(&mut out));
        out
    }

    /// The node with id `id`.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes().into_iter().find(|n| n.id() == Some(id))
    }

    /// The node with id `id`, mutably.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes_mut().into_iter().find(|n| n.id() == Some(id))
    }

    /// The focused node.
    pub fn focused(&self) -> Option<&Node> {
        self.nodes().into_iter().find(|n| has_focus(n))
    }

    /// The focused node, mutably.
    pub fn focused_mut(&mut self) -> Option<&mut Node> {
        self.nodes_mut().into_iter().find(|n| has_focus(n))
    }

    /// Move focus to the next focusable node, wrapping around.
    ///
    /// Returns `false` when nothing can take focus or a node is selected.
    pub fn focus_next(&mut self) -> bool {
        self.cycle_focus(true)
    }

    /// Move focus to the previous focusable node, wrapping around.
    ///
    /// Returns `false` when nothing can take focus or a node is selected.
    pub fn focus_prev(&mut self) -> bool {
        self.cycle_focus(false)
    }

    fn cycle_focus(&mut self, forward: bool) -> bool {
        if self.selected {
            return false;
        }
        let mut nodes = self.nodes_mut();
        let current = nodes.iter().position(|n| has_focus(n));
        let focusable: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_focusable()).collect();
        let Some(&first) = focusable.first() else {
            return false;
        };
        let last = focusable[focusable.len() - 1];

        let next = match current {
            None if forward => first,
            None => last,
            Some(i) if forward => focusable.iter().copied().find(|&j| j > i).unwrap_or(first),
            Some(i) => focusable.iter().rev().copied().find(|&j| j < i).unwrap_or(last),
        };
        if let Some(node) = current.and_then(|i| nodes.get_mut(i)) {
            node.set_focus(Focus::Normal);
        }
        nodes[next].set_focus(Focus::Focus);
        tracing::debug!(focused = next, "focus moved");
        true
    }

    /// Select the focused node and dim the other focusable ones.
    pub fn select(&mut self) -> bool {
        if self.selected {
            return false;
        }
        let mut nodes = self.nodes_mut();
        let Some(focused) = nodes.iter().position(|n| has_focus(n)) else {
            return false;
        };
        for (i, node) in nodes.iter_mut().enumerate() {
            if i == focused {
                node.set_focus(Focus::Selected);
            } else if node.is_focusable() {
                node.set_focus(Focus::Unfocus);
            }
        }
        self.selected = true;
        true
    }

    /// Release the selected node and restore the others.
    pub fn deselect(&mut self) -> bool {
        if !self.selected {
            return false;
        }
        for node in self.nodes_mut() {
            if node.focus() == Focus::Selected {
                node.set_focus(Focus::Focus);
            } else if node.is_focusable() {
                node.set_focus(Focus::Normal);
            }
        }
        self.selected = false;
        true
    }

    /// Apply `command`. Returns `true` when the tree needs a repaint.
    pub fn apply(&mut self, command: &Command) -> bool {
        match *command {
            Command::Quit | Command::Noop => false,
            Command::Redraw => true,
            Command::FocusNext => self.focus_next(),
            Command::FocusPrev => self.focus_prev(),
            Command::Select => self.select(),
            Command::Deselect => self.deselect(),
            Command::Scroll(direction) => self.focused_mut().is_some_and(|node| match direction {
                Direction::Up => node.scroll_up(),
                Direction::Down => node.scroll_down(),
                Direction::Left => node.scroll_left(),
                Direction::Right => node.scroll_right(),
            }),
        }
    }
}

fn has_focus(node: &Node) -> bool {
    matches!(node.focus(), Focus::Focus | Focus::Selected)
}
