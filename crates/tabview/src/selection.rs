//! Row selection state.
//!
//! Selection is keyed by record id and is independent of filtering,
//! sorting and paging: a row stays selected while it is filtered out of
//! view. Ids whose records have left the collection stay in the set until
//! the caller purges them with [`Selection::retain`].

use std::collections::HashSet;
use std::hash::Hash;

/// The set of selected record ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Eq + Hash> {
    ids: HashSet<K>,
}

impl<K: Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Selection {
            ids: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Selection {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Checkbox state derived from a selection and the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSummary {
    /// Every selected id, across all pages.
    pub selected_count: usize,
    /// Visible rows exist and all of them are selected.
    pub is_all_visible_selected: bool,
    /// At least one visible row is selected.
    pub is_any_visible_selected: bool,
}

impl SelectionSummary {
    /// Header checkbox is in the indeterminate state.
    pub fn is_indeterminate(&self) -> bool {
        self.is_any_visible_selected && !self.is_all_visible_selected
    }
}

impl<K: Eq + Hash + Clone> Selection<K> {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_selected(&self, id: &K) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.ids.iter()
    }

    /// Selects `id` if absent, deselects it if present.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: K) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Header checkbox: deselects all of `visible` when every one of them
    /// is already selected, otherwise selects them all.
    ///
    /// Applying it twice with the same ids restores the previous state when
    /// the page started fully selected or fully unselected. A partially
    /// selected page is filled by the first call and cleared by the second.
    ///
    /// ```
    /// use tabview::Selection;
    ///
    /// let mut selection: Selection<u32> = [7].into_iter().collect();
    /// let before = selection.clone();
    ///
    /// selection.select_all_visible(&[1, 2]);
    /// assert_eq!(selection.len(), 3);
    ///
    /// selection.select_all_visible(&[1, 2]);
    /// assert_eq!(selection, before);
    /// ```
    pub fn select_all_visible(&mut self, visible: &[K]) {
        if self.all_selected(visible) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().cloned());
        }
    }

    /// Header checkbox state for the current page.
    pub fn summary(&self, visible: &[K]) -> SelectionSummary {
        SelectionSummary {
            selected_count: self.ids.len(),
            is_all_visible_selected: self.all_selected(visible),
            is_any_visible_selected: visible.iter().any(|id| self.ids.contains(id)),
        }
    }

    /// Number of selected ids that still exist among `existing`.
    pub fn live_count<'a, I>(&self, existing: I) -> usize
    where
        K: 'a,
        I: IntoIterator<Item = &'a K>,
    {
        let existing: HashSet<&K> = existing.into_iter().collect();
        self.ids.iter().filter(|id| existing.contains(id)).count()
    }

    /// Keeps only the ids for which `keep` returns `true`.
    pub fn retain<P: FnMut(&K) -> bool>(&mut self, keep: P) {
        self.ids.retain(keep);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Empty `visible` never counts as all-selected.
    fn all_selected(&self, visible: &[K]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle(3u32));
        assert!(selection.is_selected(&3));
        assert!(!selection.toggle(3));
        assert!(!selection.is_selected(&3));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_adds_missing() {
        let mut selection: Selection<u32> = [1].into_iter().collect();
        selection.select_all_visible(&[1, 2, 3]);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn select_all_when_full_deselects_only_visible() {
        let mut selection: Selection<u32> = [1, 2, 9].into_iter().collect();
        selection.select_all_visible(&[1, 2]);
        assert!(!selection.is_selected(&1));
        assert!(!selection.is_selected(&2));
        assert!(selection.is_selected(&9));
    }

    #[test]
    fn select_all_twice_on_partial_page_clears_it() {
        let mut selection: Selection<u32> = [1].into_iter().collect();

        selection.select_all_visible(&[1, 2]);
        assert_eq!(selection.len(), 2);
        assert!(selection.is_selected(&2));

        selection.select_all_visible(&[1, 2]);
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_on_empty_page_is_noop() {
        let mut selection: Selection<u32> = [5].into_iter().collect();
        selection.select_all_visible(&[]);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn summary_counts_globally() {
        let selection: Selection<&str> = ["a", "b", "z"].into_iter().collect();

        let summary = selection.summary(&["a", "b"]);
        assert_eq!(summary.selected_count, 3);
        assert!(summary.is_all_visible_selected);
        assert!(summary.is_any_visible_selected);
        assert!(!summary.is_indeterminate());

        let partial = selection.summary(&["a", "c"]);
        assert!(!partial.is_all_visible_selected);
        assert!(partial.is_any_visible_selected);
        assert!(partial.is_indeterminate());

        let empty = selection.summary(&[]);
        assert!(!empty.is_all_visible_selected);
        assert!(!empty.is_any_visible_selected);
    }

    #[test]
    fn stale_ids_are_inert_but_kept() {
        let selection: Selection<u32> = [1, 2, 404].into_iter().collect();
        let existing = [1u32, 2, 3];
        assert_eq!(selection.live_count(&existing), 2);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn retain_purges_on_request() {
        let mut selection: Selection<u32> = [1, 2, 404].into_iter().collect();
        let existing = [1u32, 2, 3];
        selection.retain(|id| existing.contains(id));
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_selected(&404));
    }
}
