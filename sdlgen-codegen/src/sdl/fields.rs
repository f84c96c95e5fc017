//! Ordered field table of one object block.

use std::collections::HashMap;

/// Output field name to SDL type token, in first-insertion order.
///
/// Writing an existing name replaces its token but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FieldTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a field, overwriting the token of an existing entry.
    pub fn insert(&mut self, name: String, token: String) {
        match self.index.get(&name) {
            Some(&idx) => self.entries[idx].1 = token,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, token));
            }
        }
    }

    /// Returns the token written for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, token)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, token)| (name.as_str(), token.as_str()))
    }
}
