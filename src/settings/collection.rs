use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use super::keys::DomainKey;


/// A mapping from domain key to the setting configured for that entity.
///
/// The key is fixed when an entry is created; items never carry a second copy of it,
/// so it cannot drift from the map. Iteration is in key order.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainMap<K: DomainKey, V> {
    entries: BTreeMap<K, V>,
}

impl<K: DomainKey, V> Default for DomainMap<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: DomainKey, V> DomainMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from its compiled-in entries.
    ///
    /// # Panics
    /// If two entries share a key. That is a mistake in a settings schema, not bad input.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = BTreeMap::new();

        for (key, item) in entries {
            if map.contains_key(&key) {
                panic!("{} '{key}' is registered twice", K::KIND);
            }

            map.insert(key, item);
        }

        Self { entries: map }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Adds or replaces an entry. Only dynamic collections should need this.
    pub fn insert(&mut self, key: K, item: V) -> Option<V> {
        self.entries.insert(key, item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut()
    }

    /// Applies `source` onto this map, entry by entry.
    ///
    /// `load_entry` runs for every key present in both maps. Entries missing from
    /// `source` are left exactly as they are. Entries only `source` knows about
    /// are skipped.
    pub fn load_with<F>(&mut self, source: &Self, mut load_entry: F)
    where
        F: FnMut(&mut V, &V),
    {
        for (key, item) in self.entries.iter_mut() {
            if let Some(source_item) = source.entries.get(key) {
                load_entry(item, source_item);
            }
        }

        for key in source.entries.keys() {
            if !self.entries.contains_key(key) {
                debug!(kind = K::KIND, key = %key, "Skipping loaded entry without a local counterpart.");
            }
        }
    }

    /// Like [`load_with`][Self::load_with], except that entries only `source` knows
    /// about are copied over. Used by collections whose key set mirrors loaded data.
    pub fn load_mirrored<F>(&mut self, source: &Self, mut load_entry: F)
    where
        V: Clone,
        F: FnMut(&mut V, &V),
    {
        for (key, source_item) in source.entries.iter() {
            match self.entries.get_mut(key) {
                Some(item) => load_entry(item, source_item),
                None => {
                    self.entries.insert(key.clone(), source_item.clone());
                }
            }
        }
    }
}

impl<K: DomainKey, V> Index<&K> for DomainMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        match self.entries.get(key) {
            Some(item) => item,
            None => panic!("no setting for {} '{key}'", K::KIND),
        }
    }
}

impl<K: DomainKey, V> FromIterator<(K, V)> for DomainMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}


impl<K: DomainKey, V: Serialize> Serialize for DomainMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, item)| (key.to_string(), item)))
    }
}

/// Entries for keys this version does not know are dropped with a warning
/// instead of failing the whole document.
impl<'de, K: DomainKey, V: Deserialize<'de>> Deserialize<'de> for DomainMap<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;

        let mut entries = BTreeMap::new();
        for (id, item) in raw {
            match K::parse_key(&id) {
                Ok(key) => {
                    entries.insert(key, item);
                }
                Err(error) => warn!(%error, "Dropping settings entry for an unknown key."),
            }
        }

        Ok(Self { entries })
    }
}
