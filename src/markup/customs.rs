//! Caller-registered custom macros.

use std::fmt;

/// A named text transform invocable from markup.
pub enum Custom {
    /// Produces a value interpolated at the next `$N` placeholder.
    Substitute(Box<dyn Fn() -> String + Send + Sync>),
    /// Receives the literal text and replaces it.
    Modify(Box<dyn Fn(&str) -> String + Send + Sync>),
}

impl Custom {
    /// Substitutions run before modifications.
    const fn rank(&self) -> u8 {
        match self {
            Self::Substitute(_) => 0,
            Self::Modify(_) => 1,
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Substitute(_) => "Custom::Substitute",
            Self::Modify(_) => "Custom::Modify",
        })
    }
}

/// Name → transform table, in registration order.
#[derive(Debug, Default)]
pub struct Customs {
    entries: Vec<(String, Custom)>,
}

impl Customs {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a substitution custom.
    #[must_use]
    pub fn substitute<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.insert(name.into(), Custom::Substitute(Box::new(f)));
        self
    }

    /// Register a text-modifying custom.
    #[must_use]
    pub fn modify<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.insert(name.into(), Custom::Modify(Box::new(f)));
        self
    }

    /// Register or replace a custom, keeping the original slot on replace.
    pub fn insert(&mut self, name: String, custom: Custom) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = custom;
        } else {
            self.entries.push((name, custom));
        }
    }

    /// Look up a custom by name.
    pub fn get(&self, name: &str) -> Option<&Custom> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Number of registered customs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the customs named in `names` over `text`.
    ///
    /// Substitutions run first, filling `$1`, `$2`, ... in registration
    /// order. Modifications then run in registration order. Unknown
    /// names are skipped.
    pub fn apply(&self, names: &[String], text: &str) -> String {
        let mut selected: Vec<(usize, &Custom)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (name, _))| names.contains(name))
            .map(|(index, (_, custom))| (index, custom))
            .collect();
        if selected.len() < names.len() {
            for name in names.iter().filter(|n| self.get(n).is_none()) {
                tracing::trace!(name = %name, "ignoring unregistered custom macro");
            }
        }
        selected.sort_by_key(|(index, custom)| (custom.rank(), *index));

        let mut out = text.to_string();
        let mut ordinal = 1;
        for (_, custom) in selected {
            match custom {
                Custom::Substitute(f) => {
                    out = out.replacen(&format!("${ordinal}"), &f(), 1);
                    ordinal += 1;
                }
                Custom::Modify(f) => out = f(&out),
            }
        }
        out
    }
}
