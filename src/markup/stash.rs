//! Stash stack for `[stash]` / `[pop]` directives.

use crate::style::StyleState;

/// Saved styles, oldest first.
///
/// Lives for one compile call only.
#[derive(Debug, Default)]
pub struct StashStack {
    entries: Vec<(Option<String>, StyleState)>,
}

impl StashStack {
    /// Push a style, optionally under a name.
    pub fn push(&mut self, name: Option<String>, state: StyleState) {
        self.entries.push((name, state));
    }

    /// Remove and return the top entry, or the most recent entry with `name`.
    pub fn pop(&mut self, name: Option<&str>) -> Option<StyleState> {
        let index = match name {
            None => self.entries.len().checked_sub(1)?,
            Some(name) => self
                .entries
                .iter()
                .rposition(|(entry, _)| entry.as_deref() == Some(name))?,
        };
        Some(self.entries.remove(index).1)
    }

    /// Number of saved styles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
