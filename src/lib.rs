//! A fixed-bucket hash map with separate chaining, and the plain list it gets
//! compared against.
//!
//! ```
//! use chained_store::ChainedHashMap;
//!
//! let mut inventory = ChainedHashMap::with_capacity(10).unwrap();
//! inventory.insert(("P001".to_owned(), "Baby Bottle"));
//! inventory.insert(("P004".to_owned(), "Pacifier Set"));
//!
//! assert_eq!(Some(&("P004".to_owned(), "Pacifier Set")), inventory.search("P004"));
//! assert!(inventory.delete("P004"));
//! assert_eq!(None, inventory.search("P004"));
//! assert_eq!(1, inventory.len());
//! ```

pub mod benchmark;
mod chain;
mod chained_hash_map;
mod error;
mod identity_hasher;
mod linear_store;
mod record;
#[cfg(feature = "shared_store")]
mod shared_store;
mod store;

pub use chain::ChainIter;
pub use chained_hash_map::{ChainedHashMap, Iter, DEFAULT_CAPACITY};
pub use error::StoreError;
pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use linear_store::LinearStore;
pub use record::Record;
#[cfg(feature = "shared_store")]
pub use shared_store::SharedStore;
pub use store::Store;
