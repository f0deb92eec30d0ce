use std::{borrow::Borrow, hash::Hash};

use crate::record::Record;

/// Describes what a store is.
pub trait Store<R>
where
    R: Record,
{
    /// Files a record away. This never fails, and records with an identifier
    /// already in the store are kept alongside the existing ones.
    fn insert(&mut self, record: R);

    /// Finds the first record with the given identifier.
    fn search<Q>(&self, id: &Q) -> Option<&R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Drops the first record with the given identifier. Returns false and
    /// leaves the store alone if there isn't one.
    fn delete<Q>(&mut self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// The number of records stored right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
