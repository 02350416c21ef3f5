use std::iter::FusedIterator;

use crate::node::{Dir, NodeId, NodeStore};

/// In-order iterator over the entries of an [`RbTree`](crate::RbTree).
pub struct Iter<'a, K, V> {
    store: &'a NodeStore<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    len: usize,
}

pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

/// Owning in-order iterator.
pub struct IntoIter<K, V>(pub(crate) std::vec::IntoIter<(K, V)>);

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        store: &'a NodeStore<K, V>,
        root: NodeId,
        len: usize,
    ) -> Self {
        let (front, back) = if store.is_leaf(root) {
            (None, None)
        } else {
            (
                Some(store.extreme(root, Dir::Left)),
                Some(store.extreme(root, Dir::Right)),
            )
        };
        Self { store, front, back, len }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let cur = self.front?;
        self.len -= 1;
        self.front = self.store.step(cur, Dir::Right);
        self.store.entry(cur)
    }
    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let cur = self.back?;
        self.len -= 1;
        self.back = self.store.step(cur, Dir::Left);
        self.store.entry(cur)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self { Self { ..*self } }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|(k, _)| k) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}
impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.0.next_back().map(|(k, _)| k)
    }
}
impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|(_, v)| v) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}
impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.0.next_back().map(|(_, v)| v)
    }
}
impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}
impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}
impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
