use crate::{
    node::{Dir, NodeId, NodeStore},
    trace::trace_case,
};

impl<K, V> NodeStore<K, V> {
    /// Rotates at `node` toward `dir`.
    ///
    /// The child of `node` on the opposite side (the pivot) takes the place
    /// of `node`, and `node` becomes the pivot's child on the `dir` side.
    /// The pivot's inner subtree moves over to `node`. In-order sequence
    /// is preserved.
    ///
    /// ```text
    ///       n                 p
    ///      / \               / \
    ///     a   p     =>      n   c      (dir == Left)
    ///        / \           / \
    ///       b   c         a   b
    /// ```
    ///
    /// The root pointer is not updated here; callers recompute it with
    /// [`top`](Self::top) once their repair is over.
    pub fn rotate(&mut self, node: NodeId, dir: Dir) {
        let pivot = self.child(node, !dir);
        debug_assert!(!self.is_leaf(pivot), "cannot rotate a sentinel up");
        trace_case!("rotate {dir:?} at {node:?}");

        let inner = self.child(pivot, dir);
        self.relink(node, pivot);

        self.set_child(node, !dir, inner);
        self.set_parent(inner, Some(node));

        self.set_child(pivot, dir, node);
        self.set_parent(node, Some(pivot));
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Dir, NodeId, NodeStore};

    fn keys(store: &NodeStore<u32, ()>, root: NodeId) -> Vec<u32> {
        let mut res = vec![];
        let mut cur = Some(store.extreme(root, Dir::Left));
        while let Some(id) = cur {
            res.push(*store.entry(id).unwrap().0);
            cur = store.step(id, Dir::Right);
        }
        res
    }

    fn assert_parent_links(store: &NodeStore<u32, ()>, id: NodeId) {
        if store.is_leaf(id) {
            return;
        }
        for dir in [Dir::Left, Dir::Right] {
            let child = store.child(id, dir);
            assert_eq!(store.parent(child), Some(id));
            assert_parent_links(store, child);
        }
    }

    #[test]
    fn rotate_both_ways() {
        //     2
        //    / \
        //   1   4
        //      / \
        //     3   5
        let mut store = NodeStore::new();
        let root = store.new_leaf(None);
        store.grow(root, 2, ());
        let one = store.child(root, Dir::Left);
        let four = store.child(root, Dir::Right);
        store.grow(one, 1, ());
        store.grow(four, 4, ());
        store.grow(store.child(four, Dir::Left), 3, ());
        store.grow(store.child(four, Dir::Right), 5, ());

        store.rotate(root, Dir::Left);
        let top = store.top(root);
        assert_eq!(top, four);
        assert_eq!(store.parent(four), None);
        assert_eq!(store.child(four, Dir::Left), root);
        assert_eq!(*store.entry(store.child(root, Dir::Right)).unwrap().0, 3);
        assert_eq!(keys(&store, top), [1, 2, 3, 4, 5]);
        assert_parent_links(&store, top);

        store.rotate(four, Dir::Right);
        let top = store.top(four);
        assert_eq!(top, root);
        assert_eq!(store.child(root, Dir::Right), four);
        assert_eq!(keys(&store, top), [1, 2, 3, 4, 5]);
        assert_parent_links(&store, top);
    }

    #[test]
    fn rotate_below_root() {
        //   1
        //    \
        //     2
        //      \
        //       3
        let mut store = NodeStore::new();
        let root = store.new_leaf(None);
        store.grow(root, 1, ());
        let two = store.child(root, Dir::Right);
        store.grow(two, 2, ());
        let three = store.child(two, Dir::Right);
        store.grow(three, 3, ());

        store.rotate(two, Dir::Left);
        assert_eq!(store.child(root, Dir::Right), three);
        assert_eq!(store.parent(three), Some(root));
        assert_eq!(store.child(three, Dir::Left), two);
        assert_eq!(keys(&store, root), [1, 2, 3]);
        assert_parent_links(&store, root);
    }
}
