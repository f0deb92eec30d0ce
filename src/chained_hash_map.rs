use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash, Hasher},
    slice,
};

use log::{debug, trace};

use crate::chain::{Chain, ChainArena, ChainIter};
use crate::error::StoreError;
use crate::record::Record;
use crate::store::Store;

/// Number of buckets a map gets when nobody asks for a specific number.
pub const DEFAULT_CAPACITY: usize = 10;

/// A hash map with a fixed number of buckets, where records that land in the
/// same bucket are strung together in a chain in the order they arrived.
///
/// The bucket count is settled at construction and never changes, so there is
/// no rehashing: a map that's given far more records than buckets just grows
/// long chains, and lookups slide toward O(n). Identifiers aren't required to
/// be unique; a duplicate is appended behind the original and every operation
/// acts on whichever record sits first in its chain.
pub struct ChainedHashMap<R, S = RandomState>
where
    R: Record,
    S: BuildHasher,
{
    buckets: Vec<Chain>,
    nodes: ChainArena<R>,
    count: usize,
    hash_builder: S,
}

impl<R> ChainedHashMap<R, RandomState>
where
    R: Record,
{
    /// Makes a new map with `DEFAULT_CAPACITY` buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a new map with a specified number of buckets.
    pub fn with_capacity(capacity: usize) -> Result<Self, StoreError> {
        ChainedHashMap::with_capacity_and_hash_builder(capacity, Default::default())
    }
}

impl<R> Default for ChainedHashMap<R, RandomState>
where
    R: Record,
{
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY, Default::default())
    }
}

impl<R, S> ChainedHashMap<R, S>
where
    R: Record,
    S: BuildHasher,
{
    /// Makes a new map with a specified number of buckets and hasher. A map
    /// without any buckets has nowhere to put things, so zero is refused.
    pub fn with_capacity_and_hash_builder(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidConfiguration { capacity });
        }

        Ok(Self::build(capacity, hash_builder))
    }

    fn build(capacity: usize, hash_builder: S) -> Self {
        Self {
            buckets: vec![Chain::default(); capacity],
            nodes: ChainArena::new(),
            count: 0,
            hash_builder,
        }
    }

    /// The number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Records per bucket. Purely informational, nothing acts on it.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// The bucket an identifier belongs in. Stable for the life of this map,
    /// but two maps (or two runs) may well disagree.
    pub fn bucket_index<Q>(&self, id: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut h = self.hash_builder.build_hasher();
        id.hash(&mut h);
        (h.finish() % self.capacity() as u64) as usize
    }

    /// Appends a record to the end of its bucket's chain.
    pub fn insert(&mut self, record: R) {
        let index = self.bucket_index(record.id());
        self.nodes.push_back(&mut self.buckets[index], record);
        self.count += 1;

        debug!(
            "inserted record into bucket {} ({} records in {} buckets)",
            index,
            self.count,
            self.capacity()
        );

        #[cfg(test)]
        self.continuity_test();
    }

    /// Scans the identifier's bucket from the head and returns the first
    /// record filed under it.
    pub fn search<Q>(&self, id: &Q) -> Option<&R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(id);
        self.nodes
            .iter(&self.buckets[index])
            .find(|record| {
                let own: &Q = record.id().borrow();
                own == id
            })
    }

    /// Takes the first record filed under the identifier out of its chain.
    /// Only the identifier's own bucket is looked at.
    pub fn remove<Q>(&mut self, id: &Q) -> Option<R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(id);
        let removed = self.nodes.remove_first(&mut self.buckets[index], |record| {
            let own: &Q = record.id().borrow();
            own == id
        });

        match removed {
            Some(_) => {
                self.count -= 1;
                debug!(
                    "deleted record from bucket {} ({} records left)",
                    index, self.count
                );
            }
            None => trace!("no record to delete in bucket {}", index),
        }

        #[cfg(test)]
        self.continuity_test();

        removed
    }

    /// Like `remove`, but only says whether anything went.
    pub fn delete<Q>(&mut self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(id).is_some()
    }

    /// Every record, bucket by bucket in increasing index order and in chain
    /// order within a bucket. Each call starts over from bucket 0.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            nodes: &self.nodes,
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.count,
        }
    }

    /// The non-empty buckets alongside their indexes, for showing how the
    /// records are actually spread out.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, ChainIter<'_, R>)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, chain)| !chain.is_empty())
            .map(move |(index, chain)| (index, self.nodes.iter(chain)))
    }

    /// Empties every bucket. The bucket count stays what it was.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            *chain = Chain::default();
        }
        self.nodes.clear();
        self.count = 0;

        #[cfg(test)]
        self.continuity_test();
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        // every chain adds up to the count, and the arena holds no more and
        // no less than that
        let chained: usize = self.buckets.iter().map(|chain| chain.len()).sum();
        assert_eq!(self.count, chained);
        assert_eq!(self.count, self.nodes.len());

        // everything sits in the bucket its identifier hashes to
        for (index, chain) in self.buckets.iter().enumerate() {
            let mut walked = 0;
            for record in self.nodes.iter(chain) {
                assert_eq!(index, self.bucket_index(record.id()));
                walked += 1;
                assert!(walked <= chain.len());
            }
            assert_eq!(chain.len(), walked);
        }
    }
}

impl<R, S> Store<R> for ChainedHashMap<R, S>
where
    R: Record,
    S: BuildHasher,
{
    fn insert(&mut self, record: R) {
        ChainedHashMap::insert(self, record)
    }

    fn search<Q>(&self, id: &Q) -> Option<&R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        ChainedHashMap::search(self, id)
    }

    fn delete<Q>(&mut self, id: &Q) -> bool
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        ChainedHashMap::delete(self, id)
    }

    fn len(&self) -> usize {
        self.count
    }
}

impl<R, S> Extend<R> for ChainedHashMap<R, S>
where
    R: Record,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<'a, R, S> IntoIterator for &'a ChainedHashMap<R, S>
where
    R: Record,
    S: BuildHasher,
{
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks a `ChainedHashMap` one bucket at a time.
pub struct Iter<'a, R> {
    nodes: &'a ChainArena<R>,
    buckets: slice::Iter<'a, Chain>,
    current: Option<ChainIter<'a, R>>,
    remaining: usize,
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.current.as_mut().and_then(|chain| chain.next()) {
                self.remaining -= 1;
                return Some(record);
            }

            let chain = self.buckets.next()?;
            self.current = Some(self.nodes.iter(chain));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, R> ExactSizeIterator for Iter<'a, R> {}

#[cfg(test)]
mod tests {
    use super::{ChainedHashMap, DEFAULT_CAPACITY};
    use crate::identity_hasher::BuildIdentityHasher;
    use crate::record::Record;
    use crate::StoreError;

    #[derive(Debug, Clone, PartialEq)]
    struct Product {
        id: String,
        name: &'static str,
    }

    impl Product {
        fn new(id: &str, name: &'static str) -> Self {
            Self {
                id: id.to_owned(),
                name,
            }
        }
    }

    impl Record for Product {
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }
    }

    fn inventory() -> ChainedHashMap<Product> {
        let mut map = ChainedHashMap::with_capacity(10).unwrap();
        map.extend(vec![
            Product::new("P001", "Baby Bottle"),
            Product::new("P002", "Diaper Pack"),
            Product::new("P003", "Baby Stroller"),
            Product::new("P004", "Pacifier Set"),
            Product::new("P005", "Baby Monitor"),
            Product::new("P006", "Onesie 3-Pack"),
            Product::new("P007", "Baby Wipes"),
            Product::new("P008", "Soft Toys"),
        ]);
        map
    }

    fn ids<'a, I: Iterator<Item = &'a Product>>(records: I) -> Vec<&'a str> {
        records.map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_zero_capacity_is_refused() {
        assert_eq!(
            Some(StoreError::InvalidConfiguration { capacity: 0 }),
            ChainedHashMap::<Product>::with_capacity(0).err()
        );
        assert!(ChainedHashMap::<(u64, u64), _>::with_capacity_and_hash_builder(
            0,
            BuildIdentityHasher
        )
        .is_err());
    }

    #[test]
    fn test_default_capacity() {
        let map: ChainedHashMap<Product> = ChainedHashMap::new();
        assert_eq!(DEFAULT_CAPACITY, map.capacity());
        assert!(map.is_empty());
    }

    #[test]
    fn test_search_and_delete_inventory() {
        let mut map = inventory();
        assert_eq!(8, map.len());

        assert_eq!("Pacifier Set", map.search("P004").unwrap().name);
        assert!(map.delete("P004"));
        assert_eq!(None, map.search("P004"));
        assert_eq!(7, map.len());

        // the rest didn't go anywhere
        assert_eq!("Soft Toys", map.search("P008").unwrap().name);
        assert_eq!("Baby Bottle", map.search(&"P001".to_owned()).unwrap().name);
    }

    #[test]
    fn test_deleting_missing_id_twice() {
        let mut map = inventory();

        assert!(!map.delete("P999"));
        assert!(!map.delete("P999"));
        assert_eq!(8, map.len());
        assert_eq!(None, map.remove("P999"));
    }

    #[test]
    fn test_single_bucket_chain_order() {
        let mut map: ChainedHashMap<Product> = ChainedHashMap::with_capacity(1).unwrap();
        map.insert(Product::new("A", "a"));
        map.insert(Product::new("B", "b"));
        map.insert(Product::new("C", "c"));

        assert_eq!(vec!["A", "B", "C"], ids(map.iter()));
        assert!(map.delete("B"));
        assert_eq!(vec!["A", "C"], ids(map.iter()));

        // deleting the head and then the tail leaves the chain usable
        assert!(map.delete("A"));
        assert!(map.delete("C"));
        assert!(map.is_empty());
        map.insert(Product::new("D", "d"));
        assert_eq!(vec!["D"], ids(map.iter()));
    }

    #[test]
    fn test_duplicates_resolve_to_first_inserted() {
        let mut map: ChainedHashMap<Product> = ChainedHashMap::with_capacity(1).unwrap();
        map.insert(Product::new("X", "first"));
        map.insert(Product::new("Y", "other"));
        map.insert(Product::new("X", "second"));
        assert_eq!(3, map.len());

        assert_eq!("first", map.search("X").unwrap().name);

        // only the first goes, the later duplicate takes its place
        assert_eq!(Some("first"), map.remove("X").map(|p| p.name));
        assert_eq!("second", map.search("X").unwrap().name);
        assert_eq!(2, map.len());

        assert!(map.delete("X"));
        assert_eq!(None, map.search("X"));
    }

    #[test]
    fn test_collisions_under_identity_hash() {
        // with ids as their own hash, 1, 11 and 21 all land in bucket 1
        let mut map: ChainedHashMap<(u64, &str), BuildIdentityHasher> =
            ChainedHashMap::with_capacity_and_hash_builder(10, BuildIdentityHasher).unwrap();

        map.insert((21, "c"));
        map.insert((1, "a"));
        map.insert((11, "b"));
        map.insert((4, "d"));

        assert_eq!(1, map.bucket_index(&11u64));

        let buckets: Vec<(usize, Vec<u64>)> = map
            .buckets()
            .map(|(index, chain)| (index, chain.map(|r| r.0).collect()))
            .collect();
        assert_eq!(vec![(1, vec![21, 1, 11]), (4, vec![4])], buckets);

        assert!(map.delete(&1u64));
        assert_eq!(Some(&(11, "b")), map.search(&11u64));
        assert_eq!(vec![21, 11, 4], map.iter().map(|r| r.0).collect::<Vec<_>>());
    }

    #[test]
    fn test_enumeration_matches_count() {
        let mut map = inventory();
        map.delete("P002");
        map.delete("P007");

        let listed = ids(map.iter());
        assert_eq!(map.len(), listed.len());
        assert_eq!(map.len(), map.iter().len());
        assert!(!listed.contains(&"P002"));
        assert!(!listed.contains(&"P007"));

        // a second pass sees the very same thing
        assert_eq!(listed, ids((&map).into_iter()));
    }

    #[test]
    fn test_count_tracks_inserts_minus_deletes() {
        let mut map: ChainedHashMap<(u64, u64), BuildIdentityHasher> =
            ChainedHashMap::with_capacity_and_hash_builder(3, BuildIdentityHasher).unwrap();

        let mut inserted = 0;
        let mut deleted = 0;
        for i in 0..30u64 {
            map.insert((i % 7, i));
            inserted += 1;
            if i % 4 == 0 && map.delete(&(i % 5)) {
                deleted += 1;
            }
            assert_eq!(inserted - deleted, map.len());
        }

        assert!((map.load_factor() - map.len() as f64 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = inventory();
        map.clear();

        assert!(map.is_empty());
        assert_eq!(10, map.capacity());
        assert_eq!(0, map.iter().count());

        map.insert(Product::new("P009", "Teether"));
        assert_eq!("Teether", map.search("P009").unwrap().name);
    }
}
