//! Node store.
//!
//! Every node lives in one `Vec` and is referred to by a [`NodeId`].
//! Child links are the owning relation: a slot is released together with
//! the entry it holds, and released slots are recycled by later
//! allocations. Parent links (and the sibling/uncle/grandparent derived
//! from them) are plain ids used for navigation only.
//!
//! Sentinel leaves are ordinary slots without an entry. They are always
//! black and never have children.

use std::ops::Not;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    const NIL: Self = Self(usize::MAX);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    fn index(self) -> usize {
        match self {
            Dir::Left => 0,
            Dir::Right => 1,
        }
    }
}

impl Not for Dir {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone)]
struct Node<K, V> {
    // `None` iff the node is a sentinel.
    entry: Option<(K, V)>,
    color: Color,
    parent: Option<NodeId>,
    children: [NodeId; 2],
}

impl<K, V> Node<K, V> {
    fn leaf(parent: Option<NodeId>) -> Self {
        Self {
            entry: None,
            color: Color::Black,
            parent,
            children: [NodeId::NIL; 2],
        }
    }
}

#[derive(Clone)]
pub struct NodeStore<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<NodeId>,
}

impl<K, V> NodeStore<K, V> {
    pub fn new() -> Self { Self { nodes: vec![], free: vec![] } }

    /// Reserves room for `len` real nodes along with their sentinels.
    pub fn with_capacity(len: usize) -> Self {
        Self { nodes: Vec::with_capacity(2 * len + 1), free: vec![] }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }

    /// Number of slots in use, sentinels included.
    pub fn live_slots(&self) -> usize { self.nodes.len() - self.free.len() }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = node;
            id
        } else {
            self.nodes.push(node);
            NodeId(self.nodes.len() - 1)
        }
    }

    pub fn new_leaf(&mut self, parent: Option<NodeId>) -> NodeId {
        self.alloc(Node::leaf(parent))
    }

    /// Turns the sentinel `leaf` into a red node holding `(key, value)`
    /// with two fresh sentinel children. The parent link is kept, so the
    /// node takes the sentinel's place in the tree.
    pub fn grow(&mut self, leaf: NodeId, key: K, value: V) {
        debug_assert!(self.is_leaf(leaf));
        let left = self.new_leaf(Some(leaf));
        let right = self.new_leaf(Some(leaf));
        let node = &mut self.nodes[leaf.0];
        node.entry = Some((key, value));
        node.color = Color::Red;
        node.children = [left, right];
    }

    /// Inverse of [`grow`](Self::grow): releases both (sentinel)
    /// children and turns `node` into a black sentinel in place.
    pub fn shrink(&mut self, node: NodeId) -> Option<(K, V)> {
        let [left, right] = self.nodes[node.0].children;
        debug_assert!(self.is_leaf(left) && self.is_leaf(right));
        self.release(left);
        self.release(right);
        let node = &mut self.nodes[node.0];
        node.color = Color::Black;
        node.children = [NodeId::NIL; 2];
        node.entry.take()
    }

    /// Frees the slot and hands back whatever entry it held. The caller
    /// must have unlinked it from the tree.
    pub fn release(&mut self, id: NodeId) -> Option<(K, V)> {
        let entry = std::mem::replace(&mut self.nodes[id.0], Node::leaf(None))
            .entry;
        self.free.push(id);
        entry
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].entry.is_none()
    }

    pub fn color(&self, id: NodeId) -> Color { self.nodes[id.0].color }
    pub fn is_red(&self, id: NodeId) -> bool { self.color(id) == Color::Red }
    pub fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }
    pub fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(color == Color::Black || !self.is_leaf(id));
        self.nodes[id.0].color = color;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.0].parent = parent;
    }

    pub fn child(&self, id: NodeId, dir: Dir) -> NodeId {
        debug_assert!(!self.is_leaf(id), "sentinels have no children");
        self.nodes[id.0].children[dir.index()]
    }
    pub fn set_child(&mut self, id: NodeId, dir: Dir, child: NodeId) {
        self.nodes[id.0].children[dir.index()] = child;
    }

    /// Which side of its parent `id` hangs on; `None` at the root.
    pub fn dir_of(&self, id: NodeId) -> Option<Dir> {
        let parent = self.parent(id)?;
        if self.child(parent, Dir::Left) == id {
            Some(Dir::Left)
        } else {
            debug_assert_eq!(self.child(parent, Dir::Right), id);
            Some(Dir::Right)
        }
    }

    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let dir = self.dir_of(id)?;
        self.parent(id).map(|parent| self.child(parent, !dir))
    }
    pub fn grandparent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(self.parent(id)?)
    }
    pub fn uncle(&self, id: NodeId) -> Option<NodeId> {
        self.sibling(self.parent(id)?)
    }

    /// Puts `new` where `old` is, as seen from `old`'s parent. `old`'s own
    /// links are left untouched.
    pub fn relink(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        if let (Some(parent), Some(dir)) = (parent, self.dir_of(old)) {
            self.set_child(parent, dir, new);
        }
        self.set_parent(new, parent);
    }

    pub fn entry(&self, id: NodeId) -> Option<(&K, &V)> {
        self.nodes[id.0].entry.as_ref().map(|(k, v)| (k, v))
    }
    pub fn entry_mut(&mut self, id: NodeId) -> Option<(&K, &mut V)> {
        self.nodes[id.0].entry.as_mut().map(|(k, v)| (&*k, v))
    }
    pub fn take_entry(&mut self, id: NodeId) -> Option<(K, V)> {
        self.nodes[id.0].entry.take()
    }
    pub fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        let tmp = self.nodes[a.0].entry.take();
        self.nodes[a.0].entry =
            std::mem::replace(&mut self.nodes[b.0].entry, tmp);
    }

    /// The real node furthest toward `dir` in the subtree of `id`.
    pub fn extreme(&self, mut id: NodeId, dir: Dir) -> NodeId {
        debug_assert!(!self.is_leaf(id));
        loop {
            let next = self.child(id, dir);
            if self.is_leaf(next) {
                return id;
            }
            id = next;
        }
    }

    /// The in-order neighbor of the real node `id` toward `dir`.
    pub fn step(&self, id: NodeId, dir: Dir) -> Option<NodeId> {
        let next = self.child(id, dir);
        if !self.is_leaf(next) {
            return Some(self.extreme(next, !dir));
        }
        let mut cur = id;
        while self.dir_of(cur)? == dir {
            cur = self.parent(cur)?;
        }
        self.parent(cur)
    }

    /// Walks up the parent links from `id` to the topmost node.
    pub fn top(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_and_shrink() {
        let mut store = NodeStore::new();
        let root = store.new_leaf(None);
        assert!(store.is_leaf(root));
        assert!(store.is_black(root));

        store.grow(root, 1, "one");
        assert!(!store.is_leaf(root));
        assert!(store.is_red(root));
        assert_eq!(store.live_slots(), 3);
        for dir in [Dir::Left, Dir::Right] {
            let leaf = store.child(root, dir);
            assert!(store.is_leaf(leaf));
            assert!(store.is_black(leaf));
            assert_eq!(store.parent(leaf), Some(root));
            assert_eq!(store.dir_of(leaf), Some(dir));
        }

        assert_eq!(store.shrink(root), Some((1, "one")));
        assert!(store.is_leaf(root));
        assert!(store.is_black(root));
        assert_eq!(store.live_slots(), 1);
    }

    #[test]
    fn released_slots_are_recycled() {
        let mut store = NodeStore::<i32, ()>::new();
        let root = store.new_leaf(None);
        store.grow(root, 0, ());
        let left = store.child(root, Dir::Left);
        store.release(left);
        let again = store.new_leaf(Some(root));
        assert_eq!(again, left);
        assert_eq!(store.live_slots(), 3);
    }

    #[test]
    fn navigation() {
        //     2
        //    / \
        //   1   3
        let mut store = NodeStore::new();
        let root = store.new_leaf(None);
        store.grow(root, 2, ());
        let one = store.child(root, Dir::Left);
        let three = store.child(root, Dir::Right);
        store.grow(one, 1, ());
        store.grow(three, 3, ());

        assert_eq!(store.sibling(one), Some(three));
        assert_eq!(store.sibling(root), None);
        let leaf = store.child(three, Dir::Left);
        assert_eq!(store.grandparent(leaf), Some(root));
        assert_eq!(store.uncle(leaf), Some(one));
        assert_eq!(store.top(leaf), root);

        assert_eq!(store.extreme(root, Dir::Left), one);
        assert_eq!(store.extreme(root, Dir::Right), three);
        assert_eq!(store.step(one, Dir::Right), Some(root));
        assert_eq!(store.step(root, Dir::Right), Some(three));
        assert_eq!(store.step(three, Dir::Right), None);
        assert_eq!(store.step(three, Dir::Left), Some(root));
        assert_eq!(store.step(one, Dir::Left), None);

        store.swap_entries(one, three);
        assert_eq!(store.entry(one), Some((&3, &())));
        assert_eq!(store.entry(three), Some((&1, &())));
    }
}
