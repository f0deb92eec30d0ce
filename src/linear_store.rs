//! The baseline a `ChainedHashMap` gets measured against: records in a plain
//! Vec in the order they came in, found by walking it front to back.

use std::{borrow::Borrow, hash::Hash, slice};

use log::trace;

use crate::record::Record;
use crate::store::Store;

/// An unindexed, insertion-ordered pile of records. Every search is a full
/// scan up to the first match.
pub struct LinearStore<R>
where
    R: Record,
{
    records: Vec<R>,
}

impl<R> LinearStore<R>
where
    R: Record,
{
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Makes a store with room for `capacity` records before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record to the end.
    pub fn insert(&mut self, record: R) {
        self.records.push(record);
        trace!("appended record at position {}", self.records.len() - 1);
    }

    /// The first record with the given identifier, if any.
    pub fn search<Q>(&self, id: &Q) -> Option<&R>
    where
        R::Id: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(id).map(|at| &self.records[at])
    }

    /// Takes the first record with the given identifier out, keeping the rest
    /// in order.
    pub fn remove<Q>(&mut self, id: &Q) -> Option<R>
    where
        R::Id: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(id).map(|at| self.records.remove(at))
    }

    pub fn delete<Q>(&mut self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.remove(id).is_some()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn position<Q>(&self, id: &Q) -> Option<usize>
    where
        R::Id: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.records.iter().position(|record| {
            let own: &Q = record.id().borrow();
            own == id
        })
    }
}

impl<R> Default for LinearStore<R>
where
    R: Record,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Store<R> for LinearStore<R>
where
    R: Record,
{
    fn insert(&mut self, record: R) {
        LinearStore::insert(self, record)
    }

    fn search<Q>(&self, id: &Q) -> Option<&R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LinearStore::search(self, id)
    }

    fn delete<Q>(&mut self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LinearStore::delete(self, id)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl<R> Extend<R> for LinearStore<R>
where
    R: Record,
{
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<'a, R> IntoIterator for &'a LinearStore<R>
where
    R: Record,
{
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
