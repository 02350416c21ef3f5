use std::cmp::Ordering;

use crate::{
    node::{Color, Dir, NodeId},
    trace::trace_case,
    RbTree,
};

/// The shape around a freshly reddened node, tested in this order.
enum InsertCase {
    /// The node is the root.
    Root,
    /// Nothing is violated.
    BlackParent,
    /// Recolor and continue at the grandparent.
    RedUncle { parent: NodeId, uncle: NodeId, grandparent: NodeId },
    /// One or two rotations finish the job.
    BlackUncle { parent: NodeId, grandparent: NodeId },
}

impl<K: Ord, V> RbTree<K, V> {
    /// Inserts `value` under `key`.
    ///
    /// If the key is already present its value is replaced and the old one
    /// is returned; the key itself is not updated.
    ///
    /// # Examples
    /// ```
    /// use rb_tree::RbTree;
    ///
    /// let mut map = RbTree::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut cur = self.root;
        loop {
            let ord = match self.store.entry(cur) {
                Some((k, _)) => key.cmp(k),
                None => break,
            };
            cur = match ord {
                Ordering::Less => self.store.child(cur, Dir::Left),
                Ordering::Greater => self.store.child(cur, Dir::Right),
                Ordering::Equal => {
                    let (_, old) = self.store.entry_mut(cur)?;
                    return Some(std::mem::replace(old, value));
                }
            };
        }
        self.place(cur, key, value);
        None
    }

    /// Inserts a new entry even if an equal key is already present.
    ///
    /// Equal keys are kept in insertion order; lookups and removals find
    /// one of them.
    pub fn insert_multi(&mut self, key: K, value: V) {
        let mut cur = self.root;
        while let Some((k, _)) = self.store.entry(cur) {
            let dir = if key < *k { Dir::Left } else { Dir::Right };
            cur = self.store.child(cur, dir);
        }
        self.place(cur, key, value);
    }
}

impl<K, V> RbTree<K, V> {
    fn place(&mut self, leaf: NodeId, key: K, value: V) {
        self.store.grow(leaf, key, value);
        self.len += 1;
        self.insert_repair(leaf);
        self.root = self.store.top(leaf);
    }

    fn insert_case(&self, node: NodeId) -> InsertCase {
        let store = &self.store;
        let Some(parent) = store.parent(node) else {
            return InsertCase::Root;
        };
        if store.is_black(parent) {
            return InsertCase::BlackParent;
        }
        // A red parent is never the root.
        let (Some(grandparent), Some(uncle)) =
            (store.grandparent(node), store.uncle(node))
        else {
            unreachable!("red root at {parent:?}");
        };
        if store.is_red(uncle) {
            InsertCase::RedUncle { parent, uncle, grandparent }
        } else {
            InsertCase::BlackUncle { parent, grandparent }
        }
    }

    /// Restores the invariants after `node` has been colored red. Only the
    /// red-red rule can be broken, and only between `node` and its parent.
    fn insert_repair(&mut self, mut node: NodeId) {
        loop {
            match self.insert_case(node) {
                InsertCase::Root => {
                    trace_case!("insert: root {node:?}");
                    self.store.set_color(node, Color::Black);
                    return;
                }
                InsertCase::BlackParent => {
                    trace_case!("insert: black parent");
                    return;
                }
                InsertCase::RedUncle { parent, uncle, grandparent } => {
                    trace_case!("insert: red uncle, recolor {grandparent:?}");
                    self.store.set_color(parent, Color::Black);
                    self.store.set_color(uncle, Color::Black);
                    self.store.set_color(grandparent, Color::Red);
                    node = grandparent;
                }
                InsertCase::BlackUncle { parent, grandparent } => {
                    trace_case!("insert: black uncle at {grandparent:?}");
                    self.rotate_outer(node, parent, grandparent);
                    return;
                }
            }
        }
    }

    fn rotate_outer(
        &mut self,
        node: NodeId,
        mut parent: NodeId,
        grandparent: NodeId,
    ) {
        let store = &mut self.store;
        let (Some(outer), Some(side)) = (store.dir_of(parent), store.dir_of(node))
        else {
            unreachable!();
        };
        if side != outer {
            // zig-zag; straighten it first.
            store.rotate(parent, outer);
            parent = node;
        }
        store.rotate(grandparent, !outer);
        store.set_color(parent, Color::Black);
        store.set_color(grandparent, Color::Red);
    }
}
