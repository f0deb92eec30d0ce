//! Singly linked chains which share one flattened Vec of nodes. Every bucket
//! of a `ChainedHashMap` is a `Chain`, which is nothing but a head, a tail and
//! a length; the nodes themselves live in a single `ChainArena` and are
//! addressed by their position in it. Removed nodes are freelisted and get
//! reused by later appends. There is no compaction.

/// Alias for the index of a node in the arena's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

/// A node that lives in some chain.
struct Node<T> {
    /// The value being stored. Freelisted nodes have already given theirs up.
    value: Option<T>,

    /// The next node in the same chain.
    next: Option<NodeHandle>,
}

/// The links of one chain. A chain doesn't own its nodes, the arena does, so
/// the chain is only meaningful alongside the arena it was built in.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Chain {
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    len: usize,
}

impl Chain {
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Backing storage for any number of chains.
pub(crate) struct ChainArena<T> {
    /// The nodes of every chain.
    store: Vec<Node<T>>,

    /// Entries which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,
}

impl<T> ChainArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            store: Vec::new(),
            free: Vec::new(),
        }
    }

    /// The number of live nodes across all chains.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    /// Appends t to the end of a chain. The tail handle makes this O(1) no
    /// matter how long the chain has grown.
    pub(crate) fn push_back(&mut self, chain: &mut Chain, t: T) -> NodeHandle {
        let n = Node {
            value: Some(t),
            next: None,
        };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        let idx = self
            .free
            .pop()
            .unwrap_or_else(|| NodeHandle(self.store.len()));

        if self.store.len() <= idx.0 {
            self.store.push(n);
        } else {
            self.store[idx.0] = n;
        }

        match chain.tail {
            Some(tail) => self.store[tail.0].next = Some(idx),
            None => chain.head = Some(idx),
        }

        chain.tail = Some(idx);
        chain.len += 1;

        idx
    }

    /// Unlinks the first node in the chain whose value matches and hands the
    /// value back. Nodes after it stay where they are.
    pub(crate) fn remove_first<F>(&mut self, chain: &mut Chain, mut matches: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut prev: Option<NodeHandle> = None;
        let mut cursor = chain.head;

        while let Some(node) = cursor {
            let hit = self.store[node.0].value.as_ref().map_or(false, &mut matches);
            let next = self.store[node.0].next;

            if hit {
                // link prev to next so node doesn't exist in the chain
                // anymore; it'll get overwritten at some later push by placing
                // its handle on the freelist
                match prev {
                    Some(prev) => self.store[prev.0].next = next,
                    None => chain.head = next,
                }

                if chain.tail == Some(node) {
                    chain.tail = prev;
                }

                chain.len -= 1;
                self.store[node.0].next = None;
                self.free.push(node);

                return self.store[node.0].value.take();
            }

            prev = cursor;
            cursor = next;
        }

        None
    }

    /// Walks a chain from head to tail.
    pub(crate) fn iter<'a>(&'a self, chain: &Chain) -> ChainIter<'a, T> {
        ChainIter {
            arena: self,
            idx: chain.head,
            remaining: chain.len,
        }
    }

    /// Clears every chain at once. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
    }
}

/// Iterates the records of one bucket in the order they were inserted.
pub struct ChainIter<'a, T> {
    arena: &'a ChainArena<T>,
    idx: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena.store[self.idx?.0];
        self.idx = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for ChainIter<'a, T> {}
