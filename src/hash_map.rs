use std::{
    borrow::Borrow,
    fmt::Debug,
    hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash},
    mem,
};

use rand::Rng;

use crate::{entry::Entry, tracing_support::debug};

/// Table capacity used by [`ProbeHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 17;

/// Prime modulus used by [`ProbeHashMap::new`] and
/// [`ProbeHashMap::with_capacity`].
pub const DEFAULT_PRIME: u64 = 109_345_121;

enum Slot<K, V> {
    Empty,
    /// A deleted entry.  Lookups probe past it; insertions may reuse it.
    Tombstone,
    Occupied(Entry<K, V>),
}

impl<K, V> Slot<K, V> {
    fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    fn entry_mut(&mut self) -> Option<&mut Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    fn into_entry(self) -> Option<Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

/// A hash map using open addressing with linear probing.
///
/// A key's home slot is `((h * scale + shift) mod prime) mod capacity`, where
/// `h` is the key's [`Hash`] output under a fixed hasher and `scale`/`shift`
/// are drawn at random per instance, so that no fixed key sequence clusters
/// badly in every map.  Removal leaves a tombstone so that probe chains
/// running through the removed slot stay intact.  The table grows to
/// `2 * capacity - 1` whenever more than half of it is occupied; tombstones
/// are discarded when that happens.
pub struct ProbeHashMap<K, V> {
    table: Vec<Slot<K, V>>,
    len: usize,
    prime: u64,
    scale: u64,
    shift: u64,
}

impl<K, V> ProbeHashMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty map with the default capacity and prime.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with the given initial table capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_prime(capacity, DEFAULT_PRIME)
    }

    /// Creates an empty map with the given initial capacity and prime modulus.
    ///
    /// # Panics
    ///
    /// Panics if `prime` is less than 2.
    pub fn with_capacity_and_prime(capacity: usize, prime: u64) -> Self {
        Self::with_rng(capacity, prime, &mut rand::rng())
    }

    /// Like [`Self::with_capacity_and_prime`], drawing the hash parameters
    /// from `rng`.  A seeded generator makes the table layout reproducible.
    ///
    /// # Panics
    ///
    /// Panics if `prime` is less than 2.
    pub fn with_rng(capacity: usize, prime: u64, rng: &mut impl Rng) -> Self {
        assert!(prime > 1, "ProbeHashMap prime must be at least 2");
        Self {
            table: empty_table(capacity.max(2)),
            len: 0,
            prime,
            scale: rng.random_range(1..prime),
            shift: rng.random_range(0..prime),
        }
    }

    fn hash_value<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let code = BuildHasherDefault::<DefaultHasher>::default().hash_one(key);
        let mixed = (u128::from(code) * u128::from(self.scale) + u128::from(self.shift))
            % u128::from(self.prime);
        (mixed % self.table.len() as u128) as usize
    }

    /// Probes from the home slot `h`.  Returns `Ok(j)` if `key` is at slot
    /// `j`, or else `Err` with the first slot where it could be inserted.
    fn find_slot<Q>(&self, h: usize, key: &Q) -> Result<usize, Option<usize>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let capacity = self.table.len();
        let mut available = None;
        let mut j = h;
        loop {
            match &self.table[j] {
                Slot::Empty => return Err(available.or(Some(j))),
                Slot::Tombstone => {
                    available.get_or_insert(j);
                }
                Slot::Occupied(entry) if <K as Borrow<Q>>::borrow(entry.key()) == key => {
                    return Ok(j);
                }
                Slot::Occupied(_) => {}
            }
            j = (j + 1) % capacity;
            if j == h {
                return Err(available);
            }
        }
    }

    /// Gets the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the current table capacity.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Gets the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let j = self.find_slot(self.hash_value(key), key).ok()?;
        self.table[j].entry().map(Entry::value)
    }

    /// Gets a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let j = self.find_slot(self.hash_value(key), key).ok()?;
        self.table[j].entry_mut().map(Entry::value_mut)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Associates `value` with `key`, returning the value it replaced, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let h = self.hash_value(&key);
        match self.find_slot(h, &key) {
            Ok(j) => self.table[j]
                .entry_mut()
                .map(|entry| entry.replace_value(value)),
            Err(Some(j)) => {
                self.table[j] = Slot::Occupied(Entry::new(key, value));
                self.len += 1;
                if self.len > self.table.len() / 2 {
                    self.grow();
                }
                None
            }
            Err(None) => {
                // Every slot is occupied or a tombstone; rehashing clears the
                // tombstones and makes room.
                self.grow();
                self.put(key, value)
            }
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let j = self.find_slot(self.hash_value(key), key).ok()?;
        let slot = mem::replace(&mut self.table[j], Slot::Tombstone);
        self.len -= 1;
        slot.into_entry().map(|entry| entry.into_parts().1)
    }

    fn grow(&mut self) {
        let mut new_capacity = self.table.len();
        loop {
            new_capacity = 2 * new_capacity - 1;
            if self.len <= new_capacity / 2 {
                break;
            }
        }
        debug!(
            old_capacity = self.table.len(),
            new_capacity,
            len = self.len,
            "resizing probe hash map"
        );
        let old = mem::replace(&mut self.table, empty_table(new_capacity));
        for entry in old.into_iter().filter_map(Slot::into_entry) {
            let mut j = self.hash_value(entry.key());
            while self.table[j].entry().is_some() {
                j = (j + 1) % new_capacity;
            }
            self.table[j] = Slot::Occupied(entry);
        }
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.len = 0;
    }
}

impl<K, V> ProbeHashMap<K, V> {
    /// Gets an iterator over the entries of the map, in table order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.table.iter().filter_map(Slot::entry)
    }

    /// Gets an iterator over `(key, value)` pairs, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries().map(|entry| (entry.key(), entry.value()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries().map(Entry::key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries().map(Entry::value)
    }
}

fn empty_table<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

impl<K: Hash + Eq, V> Default for ProbeHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for ProbeHashMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for ProbeHashMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ProbeHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Owning iterator over the entries of a [`ProbeHashMap`].
pub struct IntoIter<K, V> {
    slots: std::vec::IntoIter<Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| slot.into_entry().map(Entry::into_parts))
    }
}

impl<K, V> IntoIterator for ProbeHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.table.into_iter(),
        }
    }
}
