use std::fmt;

use crate::{
    node::{Color, Dir, NodeId, NodeStore},
    RbTree,
};

impl<K, V> RbTree<K, V> {
    /// Minimum and maximum number of black nodes below the root on a path
    /// to a sentinel, the sentinel included. Both are equal in a valid
    /// tree.
    pub fn black_height_range(&self) -> (usize, usize) {
        fn dfs<K, V>(store: &NodeStore<K, V>, node: NodeId) -> (usize, usize) {
            if store.is_leaf(node) {
                return (0, 0);
            }
            let (mut lo, mut hi) = (usize::MAX, 0);
            for dir in [Dir::Left, Dir::Right] {
                let child = store.child(node, dir);
                let own = store.is_black(child) as usize;
                let (clo, chi) = dfs(store, child);
                lo = lo.min(clo + own);
                hi = hi.max(chi + own);
            }
            (lo, hi)
        }
        dfs(&self.store, self.root)
    }

    /// Minimum and maximum depth of the sentinels, i.e. the number of real
    /// nodes on the shortest and the longest root-to-leaf path.
    pub fn depth_range(&self) -> (usize, usize) {
        fn dfs<K, V>(store: &NodeStore<K, V>, node: NodeId) -> (usize, usize) {
            if store.is_leaf(node) {
                return (0, 0);
            }
            let (llo, lhi) = dfs(store, store.child(node, Dir::Left));
            let (rlo, rhi) = dfs(store, store.child(node, Dir::Right));
            (llo.min(rlo) + 1, lhi.max(rhi) + 1)
        }
        dfs(&self.store, self.root)
    }

    pub fn height(&self) -> usize { self.depth_range().1 }
}

impl<K: Ord, V> RbTree<K, V> {
    /// Panics if any of the red-black invariants, the key order, or the
    /// parent links are broken.
    pub fn assert_invariants(&self) {
        let store = &self.store;

        // returns the black-height
        fn dfs<K, V>(
            store: &NodeStore<K, V>,
            node: NodeId,
            count: &mut usize,
        ) -> usize {
            if store.is_leaf(node) {
                assert_eq!(store.color(node), Color::Black, "red sentinel");
                return 0;
            }
            *count += 1;
            let mut heights = [0; 2];
            for (dir, height) in [Dir::Left, Dir::Right].into_iter().zip(&mut heights) {
                let child = store.child(node, dir);
                assert_eq!(store.parent(child), Some(node), "broken parent link");
                if store.is_red(node) {
                    assert!(store.is_black(child), "red node with a red child");
                }
                *height = dfs(store, child, count) + store.is_black(child) as usize;
            }
            assert_eq!(heights[0], heights[1], "unequal black-heights");
            heights[0]
        }

        assert_eq!(store.parent(self.root), None, "root has a parent");
        assert!(store.is_black(self.root), "red root");
        let mut count = 0;
        dfs(store, self.root, &mut count);
        assert_eq!(count, self.len, "length mismatch");
        assert_eq!(store.live_slots(), 2 * self.len + 1, "leaked slots");

        let keys: Vec<_> = self.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]), "keys out of order");
    }
}

impl<K: fmt::Display, V> fmt::Display for RbTree<K, V> {
    /// Renders the tree sideways, one node per line as `key color---+`.
    /// Children are prefixed with `(l)` or `(r)` and indented by depth;
    /// sentinels are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn dfs<K: fmt::Display, V>(
            store: &NodeStore<K, V>,
            node: NodeId,
            indent: &str,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            let Some((key, _)) = store.entry(node) else {
                return Ok(());
            };
            let color = match store.color(node) {
                Color::Red => 'r',
                Color::Black => 'b',
            };
            write!(f, "{key} {color}---+")?;
            let deeper = format!("{indent}    ");
            for (dir, tag) in [(Dir::Left, 'l'), (Dir::Right, 'r')] {
                let child = store.child(node, dir);
                if !store.is_leaf(child) {
                    write!(f, "\n({tag}){indent}")?;
                    dfs(store, child, &deeper, f)?;
                }
            }
            Ok(())
        }
        dfs(&self.store, self.root, "  ", f)
    }
}
