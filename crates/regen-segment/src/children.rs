//! Ordered child storage shared by container segments

use crate::error::SegmentError;
use crate::segment::Segment;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Ordered, id-keyed children of a container segment
///
/// # Invariants
/// - The id sequence and the id → child map are the same structure, so every
///   id in the order has a child and every child appears in the order
/// - No duplicate ids
/// - Each key equals the `id()` of the child stored under it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildList {
    entries: IndexMap<String, Segment>,
}

impl ChildList {
    /// Create empty child list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child at the end
    ///
    /// # Errors
    /// Returns [`SegmentError::DuplicateChild`] if a child with the same id exists
    pub fn push(&mut self, parent: &str, child: Segment) -> Result<(), SegmentError> {
        if self.entries.contains_key(child.id()) {
            return Err(SegmentError::duplicate(parent, child.id()));
        }
        self.entries.insert(child.id().to_string(), child);
        Ok(())
    }

    /// Remove a child, keeping the order of the remaining children
    pub fn remove(&mut self, id: &str) -> Option<Segment> {
        self.entries.shift_remove(id)
    }

    /// Child by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.entries.get(id)
    }

    /// Mutable child by id
    ///
    /// Callers must not change the id of the returned segment.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Segment> {
        self.entries.get_mut(id)
    }

    /// Check if a child exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Child ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Children in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.entries.values()
    }

    /// Number of children
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the list in the given order
    ///
    /// # Errors
    /// - [`SegmentError::UnknownChild`] if `order` names an id that is not a child
    /// - [`SegmentError::InvalidOrder`] if `order` repeats or misses an id
    pub fn reordered(self, parent: &str, order: &[String]) -> Result<Self, SegmentError> {
        check_permutation(parent, order, self.ids())?;
        Ok(self.arranged(order))
    }

    /// Move the listed ids to the front in the given order
    ///
    /// Unknown ids are skipped; unlisted children keep their relative order
    /// after the listed ones.
    #[must_use]
    pub(crate) fn arranged(mut self, order: &[String]) -> Self {
        let mut entries = IndexMap::with_capacity(self.entries.len());
        for id in order {
            if let Some((key, child)) = self.entries.shift_remove_entry(id.as_str()) {
                entries.insert(key, child);
            }
        }
        entries.extend(self.entries);
        Self { entries }
    }
}

impl IntoIterator for ChildList {
    type Item = Segment;
    type IntoIter = indexmap::map::IntoValues<String, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

/// Verify that `order` lists exactly the ids in `ids`, each once
///
/// # Errors
/// Returns [`SegmentError::UnknownChild`] or [`SegmentError::InvalidOrder`]
/// naming the first offending id
pub(crate) fn check_permutation<'a>(
    parent: &str,
    order: &[String],
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), SegmentError> {
    let expected: HashSet<&str> = ids.collect();
    let mut seen = HashSet::with_capacity(order.len());

    for id in order {
        if !expected.contains(id.as_str()) {
            return Err(SegmentError::UnknownChild {
                parent: parent.to_string(),
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(SegmentError::invalid_order(
                parent,
                format!("'{id}' appears more than once"),
            ));
        }
    }

    if seen.len() != expected.len() {
        return Err(SegmentError::invalid_order(
            parent,
            format!("{} of {} children placed", seen.len(), expected.len()),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> ChildList {
        let mut children = ChildList::new();
        for id in ids {
            children.push("p", Segment::variable(*id, *id)).unwrap();
        }
        children
    }

    #[test]
    fn push_rejects_duplicate() {
        let mut children = list(&["a"]);
        let err = children.push("p", Segment::variable("a", "again")).unwrap_err();
        assert_eq!(err, SegmentError::duplicate("p", "a"));
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn remove_keeps_order() {
        let mut children = list(&["a", "b", "c"]);
        assert!(children.remove("b").is_some());
        assert_eq!(children.ids().collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(children.remove("b").is_none());
    }

    #[test]
    fn reordered_follows_order() {
        let children = list(&["a", "b", "c"]);
        let order = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let reordered = children.reordered("p", &order).unwrap();
        assert_eq!(reordered.ids().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn reordered_rejects_missing_id() {
        let children = list(&["a", "b"]);
        let result = children.reordered("p", &["a".to_string()]);
        assert!(matches!(result, Err(SegmentError::InvalidOrder { .. })));
    }

    #[test]
    fn reordered_rejects_repeat() {
        let children = list(&["a", "b"]);
        let order = vec!["a".to_string(), "a".to_string()];
        assert!(children.reordered("p", &order).is_err());
    }

    #[test]
    fn rebuilding_by_push_rejects_collapsed_ids() {
        let mut rebuilt = ChildList::new();
        let results: Vec<_> = list(&["a", "b"])
            .into_iter()
            .map(|_| rebuilt.push("p", Segment::variable("same", "")))
            .collect();
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(SegmentError::duplicate("p", "same")));
        assert_eq!(rebuilt.len(), 1);
    }

    #[test]
    fn reordered_rejects_unknown() {
        let children = list(&["a"]);
        let order = vec!["z".to_string()];
        assert_eq!(
            children.reordered("p", &order).unwrap_err(),
            SegmentError::UnknownChild {
                parent: "p".to_string(),
                id: "z".to_string(),
            }
        );
    }
}
