//! Core types for the hash table engine.

use std::fmt;

/// An owned key/value pair stored in an occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    /// Copies `key` and `value` into a new entry.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Swaps in a new value and hands back the old one.
    #[inline]
    pub fn replace_value(&mut self, value: &str) -> String {
        std::mem::replace(&mut self.value, value.to_owned())
    }

    #[inline]
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }

    /// Estimated footprint: the entry header plus both strings with a terminator byte each.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Entry>() + self.key.len() + 1 + self.value.len() + 1
    }
}

/// One bucket of the open-addressing array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    /// Never used since the array was allocated; ends every probe.
    #[default]
    Empty,
    /// Previously occupied; probes continue past it and inserts may reuse it.
    Tombstone,
    Occupied(Entry),
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    #[inline]
    pub fn entry_mut(&mut self) -> Option<&mut Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Moves the entry out, leaving the slot `Empty`.
    #[inline]
    pub fn take_entry(&mut self) -> Option<Entry> {
        match std::mem::take(self) {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

/// How many slots are in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotStats {
    pub empty: usize,
    pub tombstone: usize,
    pub occupied: usize,
}

impl SlotStats {
    pub fn total(&self) -> usize {
        self.empty + self.tombstone + self.occupied
    }
}

/// Collision counters of a table since its last resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionStats {
    pub count: usize,
    pub size: usize,
    pub total_collisions: usize,
    pub average_collisions: f64,
    pub max_collisions_insertion: usize,
}

impl fmt::Display for CollisionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Table holds {} keys with a size of {}",
            self.count, self.size
        )?;
        writeln!(
            f,
            "There have been {} collisions with an avg collision per insertion of {:.2}",
            self.total_collisions, self.average_collisions
        )?;
        write!(
            f,
            "The max collisions on a single insertion was {}",
            self.max_collisions_insertion
        )
    }
}
