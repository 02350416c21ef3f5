use std::borrow::Borrow;

use crate::{
    node::{Color, Dir, NodeId},
    trace::trace_case,
    RbTree, RbTreeError, Result,
};

/// The shape around a double-black node, tested in this order. Each case
/// assumes that the ones before it did not apply.
#[derive(Debug, Eq, PartialEq)]
enum RemoveCase {
    /// 1. The deficiency reached the root, where it is harmless.
    Root,
    /// 2. Rotate the red sibling up, then look again.
    RedSibling,
    /// 3. Push the deficiency up to a black parent.
    BlackParent,
    /// 4. A red parent absorbs the deficiency.
    RedParent,
    /// 5. Move the near nephew's red to the far side, then look again.
    RedNearNephew,
    /// 6. Rotate at the parent using the red far nephew.
    RedFarNephew,
}

impl<K: Ord, V> RbTree<K, V> {
    /// Removes `key` and returns its value, or `None` if it was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search(key)?;
        self.remove_node(node)
    }

    /// Like [`remove`](Self::remove), but reports an absent key as
    /// [`RbTreeError::NotFound`]. The tree is left untouched in that case.
    ///
    /// # Examples
    /// ```
    /// use rb_tree::{RbTree, RbTreeError};
    ///
    /// let mut map: RbTree<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(map.delete(&1), Ok("a"));
    /// assert_eq!(map.delete(&1), Err(RbTreeError::NotFound));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).ok_or(RbTreeError::NotFound)
    }
}

impl<K, V> RbTree<K, V> {
    fn remove_node(&mut self, node: NodeId) -> Option<(K, V)> {
        let store = &mut self.store;
        self.len -= 1;

        let left = store.child(node, Dir::Left);
        let right = store.child(node, Dir::Right);
        if store.parent(node).is_none()
            && store.is_leaf(left)
            && store.is_leaf(right)
        {
            trace_case!("remove: last node");
            return store.shrink(node);
        }

        // Reduce to a node with at most one real child.
        let target = if !store.is_leaf(left) && !store.is_leaf(right) {
            let pred = store.extreme(left, Dir::Right);
            store.swap_entries(node, pred);
            pred
        } else {
            node
        };

        let (child, other) = {
            let left = store.child(target, Dir::Left);
            let right = store.child(target, Dir::Right);
            if store.is_leaf(left) { (right, left) } else { (left, right) }
        };
        debug_assert!(store.is_leaf(other));
        store.relink(target, child);
        let removed_color = store.color(target);
        store.release(other);
        let entry = store.release(target);

        if removed_color == Color::Red || store.is_red(child) {
            store.set_color(child, Color::Black);
        } else {
            self.remove_repair(child);
        }
        self.root = self.store.top(child);
        entry
    }

    fn remove_case(&self, node: NodeId) -> RemoveCase {
        let store = &self.store;
        let (Some(parent), Some(dir)) = (store.parent(node), store.dir_of(node))
        else {
            return RemoveCase::Root;
        };
        let sibling = store.child(parent, !dir);
        if store.is_red(sibling) {
            return RemoveCase::RedSibling;
        }
        // The sibling's side has a black-height of at least two, so it is
        // a real node.
        let near = store.child(sibling, dir);
        let far = store.child(sibling, !dir);
        match (store.color(near), store.color(far)) {
            (Color::Black, Color::Black) if store.is_black(parent) => {
                RemoveCase::BlackParent
            }
            (Color::Black, Color::Black) => RemoveCase::RedParent,
            (Color::Red, Color::Black) => RemoveCase::RedNearNephew,
            (_, Color::Red) => RemoveCase::RedFarNephew,
        }
    }

    /// Restores the black-height after a black node has been spliced out
    /// above `node`, whose paths are now one black node short.
    fn remove_repair(&mut self, mut node: NodeId) {
        loop {
            let case = self.remove_case(node);
            trace_case!("remove: {case:?} at {node:?}");
            let store = &mut self.store;
            if case == RemoveCase::Root {
                return;
            }
            let (Some(parent), Some(dir)) = (store.parent(node), store.dir_of(node))
            else {
                unreachable!();
            };
            let sibling = store.child(parent, !dir);
            match case {
                RemoveCase::Root => unreachable!(),
                RemoveCase::RedSibling => {
                    store.set_color(parent, Color::Red);
                    store.set_color(sibling, Color::Black);
                    store.rotate(parent, dir);
                }
                RemoveCase::BlackParent => {
                    store.set_color(sibling, Color::Red);
                    node = parent;
                }
                RemoveCase::RedParent => {
                    store.set_color(sibling, Color::Red);
                    store.set_color(parent, Color::Black);
                    return;
                }
                RemoveCase::RedNearNephew => {
                    let near = store.child(sibling, dir);
                    store.set_color(sibling, Color::Red);
                    store.set_color(near, Color::Black);
                    store.rotate(sibling, !dir);
                }
                RemoveCase::RedFarNephew => {
                    let far = store.child(sibling, !dir);
                    store.set_color(sibling, store.color(parent));
                    store.set_color(parent, Color::Black);
                    store.set_color(far, Color::Black);
                    store.rotate(parent, dir);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{RbTree, RbTreeError};

    fn tree_of(keys: &[i32]) -> RbTree<i32, i32> {
        let tree: RbTree<_, _> = keys.iter().map(|&k| (k, -k)).collect();
        tree.assert_invariants();
        tree
    }

    #[test]
    fn lone_root() {
        let mut tree = tree_of(&[1]);
        assert_eq!(tree.remove_entry(&1), Some((1, -1)));
        assert!(tree.is_empty());
        assert_eq!(tree.to_string(), "");
        assert_eq!(tree.black_height_range(), (0, 0));
        tree.assert_invariants();

        tree.insert(2, -2);
        assert_eq!(tree.in_order(), [(&2, &-2)]);
        tree.assert_invariants();
    }

    #[test]
    fn red_leaf() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.remove(&3), Some(-3));
        assert_eq!(tree.to_string(), "2 b---+\n(l)  1 r---+");
        tree.assert_invariants();
    }

    #[test]
    fn black_node_with_red_child() {
        let mut tree = tree_of(&[20, 10, 30, 5]);
        assert_eq!(tree.remove(&10), Some(-10));
        assert_eq!(
            tree.to_string(),
            "20 b---+\n(l)  5 b---+\n(r)  30 b---+"
        );
        tree.assert_invariants();
    }

    #[test]
    fn black_parent() {
        // 20 b, 10 b, 30 b, 25 r, 35 r; removing 25 and 35 leaves all
        // three black, so deleting 10 pushes the deficiency up to the root.
        let mut tree = tree_of(&[20, 10, 30, 25, 35]);
        tree.remove(&25);
        tree.remove(&35);
        tree.assert_invariants();
        assert_eq!(tree.remove(&10), Some(-10));
        assert_eq!(tree.to_string(), "20 b---+\n(r)  30 r---+");
        tree.assert_invariants();
    }

    #[test]
    fn red_sibling() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        //      2 b
        //     /   \
        //   1 b   4 r
        //        /   \
        //      3 b   5 b
        //              \
        //              6 r
        assert_eq!(
            tree.to_string(),
            "2 b---+\n(l)  1 b---+\n(r)  4 r---+\n(l)      3 b---+\n(r)      5 b---+\n(r)          6 r---+"
        );
        // The sibling 4 is rotated up, after which the red parent 2 takes
        // the deficiency.
        assert_eq!(tree.remove(&1), Some(-1));
        assert_eq!(
            tree.to_string(),
            "4 b---+\n(l)  2 b---+\n(r)      3 r---+\n(r)  5 b---+\n(r)      6 r---+"
        );
        tree.assert_invariants();
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [2, 3, 4, 5, 6]);
    }

    #[test]
    fn near_nephew() {
        let mut tree = tree_of(&[20, 10, 30, 25]);
        // 30 b has a red left (near) child 25 as seen from 10.
        assert_eq!(tree.remove(&10), Some(-10));
        assert_eq!(
            tree.to_string(),
            "25 b---+\n(l)  20 b---+\n(r)  30 b---+"
        );
        tree.assert_invariants();
    }

    #[test]
    fn far_nephew() {
        let mut tree = tree_of(&[20, 10, 30, 35]);
        assert_eq!(tree.remove(&10), Some(-10));
        assert_eq!(
            tree.to_string(),
            "30 b---+\n(l)  20 b---+\n(r)  35 b---+"
        );
        tree.assert_invariants();
    }

    #[test]
    fn two_children_takes_predecessor() {
        let mut tree = tree_of(&[10, 20, 30, 15, 25, 5, 1]);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 5, 10, 15, 20, 25, 30]);
        // 10 has two real children; its predecessor 5 moves into its place.
        let before = tree.to_string();
        assert!(before.contains("(l)  10 r---+\n(l)      5 b---+"));
        assert_eq!(tree.delete(&10), Ok(-10));
        assert!(tree.to_string().contains("(l)  5 r---+\n(l)      1 b---+"));
        let (lo, hi) = tree.black_height_range();
        assert_eq!(lo, hi);
        tree.assert_invariants();
    }

    #[test]
    fn delete_twice() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.delete(&4), Ok(-4));
        let snapshot = tree.to_string();
        assert_eq!(tree.delete(&4), Err(RbTreeError::NotFound));
        assert_eq!(tree.to_string(), snapshot);
        assert_eq!(tree.len(), 6);
        tree.assert_invariants();
    }
}
