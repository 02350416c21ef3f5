use std::borrow::Borrow;

/// Ordered map backed by a sorted `Vec`. Insertion and removal take linear
/// time.
pub struct SortedList<K, V>(Vec<(K, V)>);

impl<K: Ord, V> SortedList<K, V> {
    pub fn new() -> Self { Self(vec![]) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn len(&self) -> usize { self.0.len() }

    fn position<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.binary_search_by(|(k, _)| k.borrow().cmp(key))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(key).ok().map(|i| &self.0[i].1)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Ok(i) => Some(std::mem::replace(&mut self.0[i].1, value)),
            Err(i) => {
                self.0.insert(i, (key, value));
                None
            }
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(key).ok().map(|i| self.0.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.0.iter().map(|(k, v)| (k, v))
    }
}

impl<K: Ord, V> Default for SortedList<K, V> {
    fn default() -> Self { Self::new() }
}

#[test]
fn sanity_check() {
    let mut list = SortedList::new();
    assert!(list.is_empty());

    assert_eq!(list.insert(3, "three"), None);
    assert_eq!(list.insert(1, "one"), None);
    assert_eq!(list.insert(2, "two"), None);
    assert_eq!(list.len(), 3);
    assert!(list.iter().map(|(&k, _)| k).eq([1, 2, 3]));

    assert_eq!(list.insert(2, "second"), Some("two"));
    assert_eq!(list.get(&2), Some(&"second"));
    assert_eq!(list.get(&4), None);

    assert_eq!(list.remove(&1), Some("one"));
    assert_eq!(list.remove(&1), None);
    assert!(list.iter().eq([(&2, &"second"), (&3, &"three")]));
}
