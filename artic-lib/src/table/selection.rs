//! Cross-page selection state.
//!
//! Selection is tracked by record id so membership survives page navigation
//! and row reloads.

use std::collections::HashSet;

/// How selection gestures are interpreted by the rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// One row at a time; no checkbox column.
    #[default]
    Single,
    /// Any number of rows; checkbox column shown.
    Multiple,
}

impl SelectionMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Single => Self::Multiple,
            Self::Multiple => Self::Single,
        }
    }
}

/// What happens to an existing multi-row selection when the mode switches
/// to [`SelectionMode::Single`].
///
/// The mode switch itself never interprets a gesture, so this is policy
/// rather than behavior baked into the transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeSwitchPolicy {
    /// Keep the selection as is; the mode only affects future gestures.
    #[default]
    Retain,
    /// Keep at most one selected id.
    Truncate,
}

/// Id-based selection state, independent of the page currently loaded.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: HashSet<String>,
}

impl SelectionSet {
    /// Creates a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all selected ids, sorted for deterministic ordering.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Checks if an id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Returns the number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Checks if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Unions the given ids in. Re-selecting a present id is a no-op.
    /// Returns the ids that were newly added.
    pub fn insert_all<I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = Vec::new();
        for id in ids {
            if self.selected.insert(id.clone()) {
                added.push(id);
            }
        }
        added
    }

    /// Removes the given ids. Absent ids are ignored.
    /// Returns the ids that were actually removed.
    pub fn remove_all<'a, I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut removed = Vec::new();
        for id in ids {
            if self.selected.remove(id) {
                removed.push(id.to_string());
            }
        }
        removed
    }

    /// Drops all but one id, keeping the lexicographically first (selection
    /// order carries no semantic weight). Returns the ids removed.
    pub fn truncate_to_one(&mut self) -> Vec<String> {
        if self.selected.len() <= 1 {
            return Vec::new();
        }
        let mut ids = self.ids();
        let kept = ids.remove(0);
        self.selected.clear();
        self.selected.insert(kept);
        ids
    }

    /// Clears all selection. Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn insert_is_idempotent() {
        let mut selection = SelectionSet::new();
        let added = selection.insert_all(ids(&["a", "b", "a"]));
        assert_eq!(added, ids(&["a", "b"]));
        assert_eq!(selection.insert_all(ids(&["b"])), Vec::<String>::new());
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut selection = SelectionSet::new();
        selection.insert_all(ids(&["a"]));
        assert_eq!(selection.remove_all(["x"]), Vec::<String>::new());
        assert_eq!(selection.remove_all(["a", "a"]), ids(&["a"]));
        assert!(selection.is_empty());
    }

    #[test]
    fn union_difference_algebra() {
        let mut selection = SelectionSet::new();
        selection.insert_all(ids(&["a", "b", "c"]));
        selection.remove_all(["b"]);
        selection.insert_all(ids(&["d", "a"]));
        assert_eq!(selection.ids(), ids(&["a", "c", "d"]));
    }

    #[test]
    fn truncate_keeps_one() {
        let mut selection = SelectionSet::new();
        selection.insert_all(ids(&["c", "a", "b"]));
        let removed = selection.truncate_to_one();
        assert_eq!(selection.ids(), ids(&["a"]));
        assert_eq!(removed.len(), 2);

        let mut single = SelectionSet::new();
        single.insert_all(ids(&["z"]));
        assert!(single.truncate_to_one().is_empty());
        assert_eq!(single.len(), 1);
    }
}
