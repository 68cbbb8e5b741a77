use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::types::{CollisionStats, Entry, Slot, SlotStats};
use crate::utils::poly_hash::ProbeSequence;
use crate::utils::prime::next_prime_size;
use log::{debug, trace, warn};
use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// PROBING
// =============================================================================

/// Where an insert for a key should go.
enum Probe {
    /// The key is already stored at this index.
    Found(usize),
    /// First reusable slot on the key's sequence and the occupied slots passed to reach it.
    Vacant { index: usize, collisions: usize },
}

fn allocate_slots(size: usize) -> TableResult<Vec<Slot>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(size)
        .map_err(|_| TableError::Allocation { slots: size })?;
    slots.resize_with(size, Slot::default);
    Ok(slots)
}

// =============================================================================
// ITERATORS
// =============================================================================

/// Occupied entries in bucket order, as `(key, value)`.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                self.remaining -= 1;
                return Some((entry.key(), entry.value()));
            }
        }
        None
    }
}

impl ExactSizeIterator for Iter<'_> {}

// =============================================================================
// MAIN TABLE IMPLEMENTATION
// =============================================================================

/// Open-addressing string map with double hashing over a prime-sized bucket array.
///
/// The table grows (doubling its base size) when an insert finds the load above
/// `grow_load_percent`, and shrinks (halving it) when a delete finds the load
/// below `shrink_load_percent`. Both checks use the count from before the
/// operation. Deleted slots become tombstones until the next resize drops them.
#[derive(Debug, Clone)]
pub struct HashTable {
    slots: Vec<Slot>,
    count: usize,
    base_size: usize,
    total_collisions: usize,
    max_collisions_insertion: usize,
    config: TableConfig,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    /// Creates an empty table with the default configuration (base size 10, 11 buckets).
    pub fn new() -> Self {
        let config = TableConfig::default();
        let base_size = config.initial_base_size;
        let size = next_prime_size(base_size);
        trace!("hash table starting at base size {base_size} ({size} buckets)");
        Self {
            slots: vec![Slot::Empty; size],
            count: 0,
            base_size,
            total_collisions: 0,
            max_collisions_insertion: 0,
            config,
        }
    }

    /// Creates an empty table from a validated configuration.
    pub fn with_config(config: TableConfig) -> TableResult<Self> {
        config.validate()?;
        let base_size = config.initial_base_size;
        trace!("hash table starting at base size {base_size}");
        Self::sized(config, base_size)
    }

    fn sized(config: TableConfig, base_size: usize) -> TableResult<Self> {
        let slots = allocate_slots(next_prime_size(base_size))?;
        Ok(Self {
            slots,
            count: 0,
            base_size,
            total_collisions: 0,
            max_collisions_insertion: 0,
            config,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The bucket count; always prime.
    #[inline]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// The logical capacity the bucket count was derived from.
    #[inline]
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Integer load percentage, `count * 100 / size`.
    #[inline]
    pub fn load_percent(&self) -> usize {
        self.count * 100 / self.slots.len()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[inline]
    fn probe_sequence(&self, key: &str) -> ProbeSequence {
        ProbeSequence::new(
            key,
            self.slots.len(),
            self.config.hash_prime_a,
            self.config.hash_prime_b,
        )
    }

    fn find(&self, key: &str) -> Option<usize> {
        for index in self.probe_sequence(key) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key() == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    fn probe_for_insert(&self, key: &str) -> TableResult<Probe> {
        let mut collisions = 0;
        let mut first_tombstone: Option<(usize, usize)> = None;

        for index in self.probe_sequence(key) {
            match &self.slots[index] {
                Slot::Empty => {
                    let (index, collisions) = first_tombstone.unwrap_or((index, collisions));
                    return Ok(Probe::Vacant { index, collisions });
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some((index, collisions));
                    }
                }
                Slot::Occupied(entry) if entry.key() == key => return Ok(Probe::Found(index)),
                Slot::Occupied(_) => collisions += 1,
            }
        }

        first_tombstone
            .map(|(index, collisions)| Probe::Vacant { index, collisions })
            .ok_or(TableError::Saturated {
                size: self.slots.len(),
            })
    }

    #[inline]
    fn record_collisions(&mut self, collisions: usize) {
        self.total_collisions += collisions;
        if collisions > self.max_collisions_insertion {
            self.max_collisions_insertion = collisions;
        }
    }

    /// Stores an entry that is being moved in from another array.
    fn place(&mut self, entry: Entry) -> TableResult<()> {
        match self.probe_for_insert(entry.key())? {
            Probe::Found(index) => self.slots[index] = Slot::Occupied(entry),
            Probe::Vacant { index, collisions } => {
                self.slots[index] = Slot::Occupied(entry);
                self.count += 1;
                self.record_collisions(collisions);
            }
        }
        Ok(())
    }

    /// Rebuilds the bucket array for `base_size`, dropping tombstones.
    ///
    /// Requests below the configured initial base size are ignored. A request
    /// whose prime size could not hold every entry plus one more is doubled
    /// until it can. A failed allocation leaves the table as it was.
    fn resize(&mut self, mut base_size: usize) -> TableResult<()> {
        if base_size < self.config.initial_base_size {
            trace!(
                "ignoring resize to base {base_size} below floor {}",
                self.config.initial_base_size
            );
            return Ok(());
        }
        // tiny bases can map to the same prime as before (base 1 and 2 both give 2)
        while next_prime_size(base_size) <= self.count {
            base_size *= 2;
        }
        debug!("resizing from base {} to {}", self.base_size, base_size);

        let mut fresh = Self::sized(self.config.clone(), base_size)?;
        for slot in self.slots.iter_mut() {
            if let Some(entry) = slot.take_entry() {
                fresh.place(entry)?;
            }
        }
        *self = fresh;
        Ok(())
    }

    /// Inserts or updates `key`, returning the value it replaced.
    ///
    /// Grows the table first when the load is above the grow threshold. Both
    /// strings are copied into the table.
    pub fn insert(&mut self, key: &str, value: &str) -> TableResult<Option<String>> {
        if self.load_percent() > self.config.grow_load_percent {
            debug!(
                "{} of {} buckets used, load factor exceeded, resizing up",
                self.count,
                self.size()
            );
            self.resize(self.base_size * 2)?;
        }

        match self.probe_for_insert(key)? {
            Probe::Found(index) => Ok(self.slots[index]
                .entry_mut()
                .map(|entry| entry.replace_value(value))),
            Probe::Vacant { index, collisions } => {
                self.slots[index] = Slot::Occupied(Entry::new(key, value));
                self.count += 1;
                self.record_collisions(collisions);
                Ok(None)
            }
        }
    }

    /// Inserts `keys[i] -> values[i]` in order.
    ///
    /// Not atomic: an error part-way leaves the earlier pairs in place. Slices of
    /// different lengths are rejected before anything is inserted.
    pub fn batch_insert<K, V>(&mut self, keys: &[K], values: &[V]) -> TableResult<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if keys.len() != values.len() {
            return Err(TableError::BatchLengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        for (key, value) in keys.iter().zip(values) {
            self.insert(key.as_ref(), value.as_ref())?;
        }
        Ok(())
    }

    /// Looks up the value stored for `key`.
    #[inline]
    pub fn search(&self, key: &str) -> Option<&str> {
        self.find(key)
            .and_then(|index| self.slots[index].entry())
            .map(Entry::value)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value, leaving a tombstone in its slot.
    ///
    /// Shrinks the table first when the load is below the shrink threshold. A
    /// shrink that cannot allocate is skipped; the removal still happens.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        if self.load_percent() < self.config.shrink_load_percent {
            if let Err(err) = self.resize(self.base_size / 2) {
                warn!("skipping shrink: {err}");
            }
        }

        let index = self.find(key)?;
        let (_, value) = std::mem::replace(&mut self.slots[index], Slot::Tombstone)
            .take_entry()?
            .into_parts();
        self.count -= 1;
        Some(value)
    }

    /// Removes `key`, returning whether it was present.
    #[inline]
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    /// Iterates occupied entries in bucket order. Each call starts from slot 0.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    /// Like `iter`, with the bucket index of every entry.
    pub fn iter_slots(&self) -> impl Iterator<Item = (usize, &str, &str)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.entry().map(|e| (index, e.key(), e.value())))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// The slot indices a lookup of `key` visits, ending at the match or the
    /// first empty slot.
    pub fn probe_path(&self, key: &str) -> SmallVec<[usize; 8]> {
        let mut path = SmallVec::new();
        for index in self.probe_sequence(key) {
            path.push(index);
            match &self.slots[index] {
                Slot::Empty => break,
                Slot::Occupied(entry) if entry.key() == key => break,
                _ => {}
            }
        }
        path
    }

    #[inline]
    pub fn total_collisions(&self) -> usize {
        self.total_collisions
    }

    #[inline]
    pub fn max_collisions_insertion(&self) -> usize {
        self.max_collisions_insertion
    }

    /// Mean collisions per stored entry; 0 for an empty table.
    pub fn average_collisions(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_collisions as f64 / self.count as f64
    }

    pub fn collision_stats(&self) -> CollisionStats {
        CollisionStats {
            count: self.count,
            size: self.size(),
            total_collisions: self.total_collisions,
            average_collisions: self.average_collisions(),
            max_collisions_insertion: self.max_collisions_insertion,
        }
    }

    /// Estimated bytes held: table header, bucket array, and every stored entry.
    pub fn memory_usage(&self) -> usize {
        let table =
            std::mem::size_of::<HashTable>() + self.slots.len() * std::mem::size_of::<Slot>();
        let entries: usize = self
            .slots
            .iter()
            .filter_map(Slot::entry)
            .map(Entry::memory_usage)
            .sum();
        table + entries
    }

    pub fn slot_stats(&self) -> SlotStats {
        let mut stats = SlotStats::default();
        for slot in &self.slots {
            match slot {
                Slot::Empty => stats.empty += 1,
                Slot::Tombstone => stats.tombstone += 1,
                Slot::Occupied(_) => stats.occupied += 1,
            }
        }
        stats
    }

    pub fn stats(&self) -> String {
        format!(
            "HashTable: count {} size {} base {} load {}% memory {}B",
            self.count,
            self.size(),
            self.base_size,
            self.load_percent(),
            self.memory_usage()
        )
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key, value) in self.iter_slots() {
            writeln!(f, "At bucket {index}, {key} : {value}")?;
        }
        Ok(())
    }
}
