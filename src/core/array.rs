//! Growable owning sequence shared by every variable-length result.
//!
//! Directory listings and service lists are both collected through
//! [`HandleArray`], so growth and release live in one place.

use crate::core::error::SvcError;
use std::ops::Index;
use std::slice;

/// Dense, insertion-ordered sequence of owned handles.
///
/// Growth is fallible: when an append needs room the backing store grows to
/// three times the required length (`needed + 2 * needed`, where `needed`
/// is `len + extra`), and a failed growth leaves the sequence exactly as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleArray<T> {
    items: Vec<T>,
}

impl<T> HandleArray<T> {
    /// Allocates an empty sequence able to hold at least `capacity` handles.
    pub fn allocate(capacity: usize) -> Result<Self, SvcError> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Appends `handle`, growing the backing store if it is full.
    pub fn append(&mut self, handle: T) -> Result<(), SvcError> {
        self.reserve(1)?;
        self.items.push(handle);
        Ok(())
    }

    /// Makes room for `extra` more handles without reallocating on the next
    /// `extra` appends.
    pub fn reserve(&mut self, extra: usize) -> Result<(), SvcError> {
        let len = self.items.len();
        let needed = len.saturating_add(extra);
        if needed <= self.items.capacity() {
            return Ok(());
        }
        let target = needed.saturating_add(needed.saturating_mul(2));
        self.items.try_reserve_exact(target - len)?;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
    }

    /// Hands every element to `release` in insertion order, then frees the
    /// backing store. Consumes the sequence, so it can only happen once.
    pub fn release_all<F: FnMut(T)>(self, release: F) {
        self.items.into_iter().for_each(release);
    }

}

impl<T> Default for HandleArray<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Index<usize> for HandleArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a HandleArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for HandleArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: serde::Serialize> serde::Serialize for HandleArray<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
