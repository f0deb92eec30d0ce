use std::hash::Hash;

/// Something that can be kept in a store. The only thing a store cares about
/// is the identifier; everything else is payload. Identifiers are not required
/// to be unique, duplicates simply coexist.
pub trait Record {
    type Id: Eq + Hash;

    /// The identifier this record is filed under.
    fn id(&self) -> &Self::Id;
}

impl<K, V> Record for (K, V)
where
    K: Eq + Hash,
{
    type Id = K;

    fn id(&self) -> &K {
        &self.0
    }
}
