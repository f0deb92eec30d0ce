use parking_lot::RwLock;
use std::{borrow::Borrow, hash::Hash, marker::PhantomData, sync::Arc};

use crate::record::Record;
use crate::store::Store;

/// Wrapper for a store which is shareable across thread boundaries. One lock
/// covers the whole store: lookups share it, inserts and deletes take it
/// exclusively.
pub struct SharedStore<T, R>(Arc<RwLock<T>>, PhantomData<R>)
where
    T: Store<R>,
    R: Record + Clone;

impl<T, R> SharedStore<T, R>
where
    T: Store<R>,
    R: Record + Clone,
{
    /// Wraps a store into a shared store accessor, making it safe to move
    /// across thread boundaries. Enforces an additional constraint of Clone on
    /// records.
    pub fn with_store(store: T) -> Self {
        Self(Arc::from(RwLock::from(store)), PhantomData)
    }

    /// Inserts a record into the store.
    pub fn insert(&self, record: R) {
        self.0.write().insert(record)
    }

    /// Finds a record in the store. This clones it to minimize the lock time
    /// of the store.
    pub fn search<Q>(&self, id: &Q) -> Option<R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().search(id).cloned()
    }

    /// Deletes the first record with the identifier, if there is one.
    pub fn delete<Q>(&self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.write().delete(id)
    }

    /// The number of records in the store at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Unwraps the store again, if this is the last handle to it.
    pub fn try_unwrap(self) -> Result<T, Self> {
        Arc::try_unwrap(self.0)
            .map(RwLock::into_inner)
            .map_err(|shared| Self(shared, PhantomData))
    }
}

impl<T, R> Clone for SharedStore<T, R>
where
    T: Store<R>,
    R: Record + Clone,
{
    fn clone(&self) -> Self {
        SharedStore(self.0.clone(), PhantomData)
    }
}
