//! Identity-unique, insertion-ordered collection.
//!
//! Two notions of sameness are in play. [`Entity::is_same_entity`] is the weaker
//! identity predicate used to keep the list duplicate-free on `add`, `replace` and
//! `set_all`. Full equality (`PartialEq`) is used to locate the element that
//! `replace` and `remove` operate on, so a caller can only remove the exact value
//! it observed.

use std::slice;

/// Capability set a record exposes to [`UniqueList`].
pub trait Entity: PartialEq {
    /// Returns true when both values describe the same real-world entity.
    fn is_same_entity(&self, other: &Self) -> bool;

    /// Releases whatever the record owns outside of memory (files, handles).
    fn release_external_resource(&self) {}
}

/// Failures raised at the uniqueness boundary of a [`UniqueList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("operation would result in duplicate entries")]
    DuplicateEntity,
    #[error("entry not found in the list")]
    EntityNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from `items`, which must already be identity-unique.
    pub fn from_vec(items: Vec<T>) -> Result<Self, ListError> {
        if !all_unique(&items) {
            return Err(ListError::DuplicateEntity);
        }
        Ok(Self { items })
    }

    pub fn contains(&self, candidate: &T) -> bool {
        self.items.iter().any(|item| item.is_same_entity(candidate))
    }

    pub fn add(&mut self, item: T) -> Result<(), ListError> {
        if self.contains(&item) {
            return Err(ListError::DuplicateEntity);
        }
        self.items.push(item);
        Ok(())
    }

    /// Swaps `target` for `replacement` in place.
    ///
    /// The slot held by `target` does not take part in the duplicate check, so a
    /// record may be replaced by an edited copy of itself. On failure the list is
    /// left exactly as it was.
    pub fn replace(&mut self, target: &T, replacement: T) -> Result<(), ListError> {
        let index = self
            .items
            .iter()
            .position(|item| item == target)
            .ok_or(ListError::EntityNotFound)?;

        let clashes = self
            .items
            .iter()
            .enumerate()
            .any(|(position, item)| position != index && item.is_same_entity(&replacement));
        if clashes {
            return Err(ListError::DuplicateEntity);
        }

        self.items[index] = replacement;
        Ok(())
    }

    /// Removes the element equal to `item`, releasing its external resource first.
    pub fn remove(&mut self, item: &T) -> Result<T, ListError> {
        let index = self
            .items
            .iter()
            .position(|existing| existing == item)
            .ok_or(ListError::EntityNotFound)?;

        self.items[index].release_external_resource();
        Ok(self.items.remove(index))
    }

    pub fn release_all_external_resources(&self) {
        for item in &self.items {
            item.release_external_resource();
        }
    }

    pub fn set_from(&mut self, other: &UniqueList<T>)
    where
        T: Clone,
    {
        self.items.clone_from(&other.items);
    }

    /// Replaces the whole contents. Nothing changes if `items` holds duplicates.
    pub fn set_all(&mut self, items: Vec<T>) -> Result<(), ListError> {
        if !all_unique(&items) {
            return Err(ListError::DuplicateEntity);
        }
        self.items = items;
        Ok(())
    }

    /// Stable in-place reorder with an arbitrary comparator.
    pub fn sort_with<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
    }
}

impl<T> UniqueList<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn all_unique<T: Entity>(items: &[T]) -> bool {
    items.iter().enumerate().all(|(i, left)| {
        items[i + 1..]
            .iter()
            .all(|right| !left.is_same_entity(right))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Contact {
        key: &'static str,
        detail: u32,
        released: Rc<Cell<u32>>,
    }

    impl PartialEq for Contact {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key && self.detail == other.detail
        }
    }

    impl Entity for Contact {
        fn is_same_entity(&self, other: &Self) -> bool {
            self.key == other.key
        }

        fn release_external_resource(&self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn contact(key: &'static str, detail: u32) -> Contact {
        Contact {
            key,
            detail,
            released: Rc::new(Cell::new(0)),
        }
    }

    fn keys(list: &UniqueList<Contact>) -> Vec<(&'static str, u32)> {
        list.iter().map(|c| (c.key, c.detail)).collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut list = UniqueList::new();
        list.add(contact("bo", 1)).expect("first add");
        list.add(contact("al", 2)).expect("second add");
        assert_eq!(keys(&list), vec![("bo", 1), ("al", 2)]);
    }

    #[test]
    fn add_rejects_identity_duplicate_and_leaves_list_unchanged() {
        let mut list = UniqueList::new();
        list.add(contact("al", 1)).expect("first add");
        let before = list.clone();

        assert_eq!(list.add(contact("al", 99)), Err(ListError::DuplicateEntity));
        assert_eq!(list, before);
    }

    #[test]
    fn from_vec_rejects_duplicates() {
        let result = UniqueList::from_vec(vec![contact("al", 1), contact("al", 2)]);
        assert_eq!(result.unwrap_err(), ListError::DuplicateEntity);
    }

    #[test]
    fn replace_with_edited_self_is_not_a_duplicate() {
        let mut list = UniqueList::from_vec(vec![contact("al", 1), contact("bo", 2)]).unwrap();
        list.replace(&contact("al", 1), contact("al", 7))
            .expect("self replacement allowed");
        assert_eq!(keys(&list), vec![("al", 7), ("bo", 2)]);
    }

    #[test]
    fn replace_clashing_with_other_entry_rolls_back() {
        let mut list =
            UniqueList::from_vec(vec![contact("al", 1), contact("bo", 2), contact("cy", 3)])
                .unwrap();
        let before = list.clone();

        let result = list.replace(&contact("al", 1), contact("cy", 9));

        assert_eq!(result, Err(ListError::DuplicateEntity));
        assert_eq!(keys(&list), keys(&before));
    }

    #[test]
    fn replace_requires_exact_target() {
        let mut list = UniqueList::from_vec(vec![contact("al", 1)]).unwrap();
        let result = list.replace(&contact("al", 2), contact("al", 3));
        assert_eq!(result, Err(ListError::EntityNotFound));
    }

    #[test]
    fn remove_uses_full_equality() {
        let mut list = UniqueList::from_vec(vec![contact("al", 1)]).unwrap();
        assert_eq!(
            list.remove(&contact("al", 2)).unwrap_err(),
            ListError::EntityNotFound
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_releases_resource_exactly_once() {
        let stored = contact("al", 1);
        let counter = stored.released.clone();
        let mut list = UniqueList::from_vec(vec![stored, contact("bo", 2)]).unwrap();

        list.remove(&contact("al", 1)).expect("remove succeeds");

        assert_eq!(counter.get(), 1);
        assert_eq!(keys(&list), vec![("bo", 2)]);
    }

    #[test]
    fn failed_remove_does_not_release_anything() {
        let stored = contact("al", 1);
        let counter = stored.released.clone();
        let mut list = UniqueList::from_vec(vec![stored]).unwrap();

        let _ = list.remove(&contact("al", 5));

        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn release_all_touches_every_entry_and_keeps_contents() {
        let first = contact("al", 1);
        let second = contact("bo", 2);
        let counters = (first.released.clone(), second.released.clone());
        let list = UniqueList::from_vec(vec![first, second]).unwrap();

        list.release_all_external_resources();

        assert_eq!((counters.0.get(), counters.1.get()), (1, 1));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn set_all_round_trips_unique_input() {
        let mut list = UniqueList::new();
        list.set_all(vec![contact("cy", 3), contact("al", 1)])
            .expect("unique input");
        assert_eq!(keys(&list), vec![("cy", 3), ("al", 1)]);
    }

    #[test]
    fn set_all_with_duplicates_leaves_contents_unchanged() {
        let mut list = UniqueList::from_vec(vec![contact("al", 1)]).unwrap();
        let result = list.set_all(vec![contact("bo", 1), contact("bo", 2)]);
        assert_eq!(result, Err(ListError::DuplicateEntity));
        assert_eq!(keys(&list), vec![("al", 1)]);
    }

    #[test]
    fn set_from_copies_other_list() {
        let source = UniqueList::from_vec(vec![contact("bo", 2), contact("al", 1)]).unwrap();
        let mut list = UniqueList::from_vec(vec![contact("zz", 0)]).unwrap();
        list.set_from(&source);
        assert_eq!(list, source);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = UniqueList::from_vec(vec![contact("al", 1), contact("bo", 2)]).unwrap();
        let b = UniqueList::from_vec(vec![contact("bo", 2), contact("al", 1)]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn iteration_is_restartable() {
        let list = UniqueList::from_vec(vec![contact("al", 1), contact("bo", 2)]).unwrap();
        let first: Vec<_> = list.iter().map(|c| c.key).collect();
        let second: Vec<_> = (&list).into_iter().map(|c| c.key).collect();
        assert_eq!(first, second);
    }
}
