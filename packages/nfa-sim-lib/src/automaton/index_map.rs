use crate::automaton::StateId;

/// Keys that address a compact index space starting at zero.
pub trait IndexMapKey: Copy {
    fn new(index: usize) -> Self;
    fn index(self) -> usize;
}

impl IndexMapKey for StateId {
    fn new(index: usize) -> Self {
        StateId::new(index)
    }

    fn index(self) -> usize {
        StateId::index(self)
    }
}

/// A dense map from a compact key space to values. Every key below the
/// capacity has a value, initially `V::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap<K: IndexMapKey, V> {
    data: Vec<V>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey, V: Default> IndexMap<K, V> {
    pub fn new(size: usize) -> Self {
        IndexMap {
            data: std::iter::repeat_with(V::default).take(size).collect(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<K: IndexMapKey, V> IndexMap<K, V> {
    pub fn has_key(&self, key: K) -> bool {
        key.index() < self.data.len()
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.data.get(key.index())
    }

    /// Panics if the key is outside the map.
    pub fn get_mut(&mut self, key: K) -> &mut V {
        &mut self.data[key.index()]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, value)| (K::new(index), value))
    }
}

#[test]
fn test_index_map_defaults() {
    let mut map = IndexMap::<StateId, u32>::new(3);
    *map.get_mut(StateId::new(1)) += 4;

    assert!(map.has_key(StateId::new(2)));
    assert!(!map.has_key(StateId::new(3)));
    assert_eq!(map.get(StateId::new(1)), Some(&4));
    assert_eq!(map.get(StateId::new(3)), None);
    assert_eq!(
        map.iter().map(|(k, v)| (k.index(), *v)).collect::<Vec<_>>(),
        vec![(0, 0), (1, 4), (2, 0)]
    );
}
