//! Red-black tree.
//!
//! An ordered map kept balanced by coloring each node red or black. After
//! every insertion and removal,
//!
//! - sentinel leaves are black,
//! - a red node has black children,
//! - every path from a node down to a sentinel meets the same number of
//!   black nodes, and
//! - the root is black.
//!
//! Hence a tree with $n$ entries has height at most $2\log_2(n+1)$, and
//! lookup, insertion and removal take $O(\log n)$ time.
//!
//! Insertion places a red node by the usual descent and then repairs
//! red-red violations bottom-up. Removal first trades a node with two
//! children for its in-order predecessor, splices out a node with at most
//! one child, and then repairs the black-height with the six-case cascade.
//!
//! # Examples
//! ```
//! use rb_tree::RbTree;
//!
//! let mut map = RbTree::new();
//! for k in [10, 20, 30, 15, 25, 5, 1] {
//!     map.insert(k, k.to_string());
//! }
//! assert!(map.keys().copied().eq([1, 5, 10, 15, 20, 25, 30]));
//! assert_eq!(map.lookup(&15).map(String::as_str), Ok("15"));
//!
//! map.delete(&10).unwrap();
//! assert!(!map.contains_key(&10));
//! let (lo, hi) = map.black_height_range();
//! assert_eq!(lo, hi);
//! ```

use std::{borrow::Borrow, fmt};

use thiserror::Error;

mod debug;
mod insert;
mod iter;
mod node;
mod remove;
mod rotate;
mod trace;

pub use iter::{IntoIter, Iter, Keys, Values};

use node::{Dir, NodeId, NodeStore};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum RbTreeError {
    #[error("key not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, RbTreeError>;

#[derive(Clone)]
pub struct RbTree<K, V> {
    store: NodeStore<K, V>,
    // A sentinel iff the tree is empty.
    root: NodeId,
    len: usize,
}

impl<K, V> RbTree<K, V> {
    pub fn new() -> Self { Self::with_capacity(0) }

    pub fn with_capacity(len: usize) -> Self {
        let mut store = NodeStore::with_capacity(len);
        let root = store.new_leaf(None);
        Self { store, root, len: 0 }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn clear(&mut self) {
        self.store.clear();
        self.root = self.store.new_leaf(None);
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.store, self.root, self.len)
    }
    pub fn keys(&self) -> Keys<'_, K, V> { Keys(self.iter()) }
    pub fn values(&self) -> Values<'_, K, V> { Values(self.iter()) }

    /// All entries in ascending order of keys.
    pub fn in_order(&self) -> Vec<(&K, &V)> { self.iter().collect() }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }
}

impl<K: Ord, V> RbTree<K, V> {
    fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root;
        while let Some((k, _)) = self.store.entry(cur) {
            cur = match key.cmp(k.borrow()) {
                std::cmp::Ordering::Less => self.store.child(cur, Dir::Left),
                std::cmp::Ordering::Greater => {
                    self.store.child(cur, Dir::Right)
                }
                std::cmp::Ordering::Equal => return Some(cur),
            };
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store.entry(self.search(key)?)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search(key)?;
        self.store.entry_mut(node).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but reports an absent key as
    /// [`RbTreeError::NotFound`].
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(RbTreeError::NotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self { Self::new() }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RbTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<K, V> IntoIterator for RbTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(mut self) -> IntoIter<K, V> {
        let mut order = Vec::with_capacity(self.len);
        let mut cur = (!self.store.is_leaf(self.root))
            .then(|| self.store.extreme(self.root, Dir::Left));
        while let Some(node) = cur {
            order.push(node);
            cur = self.store.step(node, Dir::Right);
        }
        let entries: Vec<_> = order
            .into_iter()
            .filter_map(|node| self.store.take_entry(node))
            .collect();
        IntoIter(entries.into_iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTree<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}
