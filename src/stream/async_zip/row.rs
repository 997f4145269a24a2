use core::ops::Deref;
use std::vec;

/// One emission of an [`AsyncZip`][crate::vec::AsyncZip].
///
/// A row pairs every value with the index of the input that produced it.
/// Under [`FIRST_COMPLETED`][super::FIRST_COMPLETED] entries are in the order
/// the inputs resolved; inputs that resolved during the same wake-up are
/// ordered by index. Under [`ALL_COMPLETED`][super::ALL_COMPLETED] entries are
/// always in input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row<T> {
    entries: Vec<(usize, T)>,
}

impl<T> Row<T> {
    pub(crate) fn new(entries: Vec<(usize, T)>) -> Self {
        Self { entries }
    }

    /// Returns the value produced by the input at `index`, if it is part of
    /// this row.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, value)| value)
    }

    /// The indexes of the inputs that contributed to this row.
    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(index, _)| *index)
    }

    /// The values of this row.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Drop the indexes and keep the values, in row order.
    pub fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }

    /// Unwrap the `(index, value)` pairs.
    pub fn into_inner(self) -> Vec<(usize, T)> {
        self.entries
    }
}

impl<T> Deref for Row<T> {
    type Target = [(usize, T)];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<T> IntoIterator for Row<T> {
    type Item = (usize, T);
    type IntoIter = vec::IntoIter<(usize, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Row<T> {
    type Item = &'a (usize, T);
    type IntoIter = core::slice::Iter<'a, (usize, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> From<Row<T>> for Vec<(usize, T)> {
    fn from(row: Row<T>) -> Self {
        row.entries
    }
}
