use std::collections::{HashMap, VecDeque};

use crate::static_table;

/// Accounting overhead of each entry (RFC 7541 section 4.1).
pub const ENTRY_OVERHEAD: usize = 32;

#[derive(Debug)]
struct Entry {
    name: Vec<u8>,
    value: Vec<u8>,
    seq: u64,
}

impl Entry {
    fn size(&self) -> usize {
        entry_size(&self.name, &self.value)
    }
}

pub fn entry_size(name: &[u8], value: &[u8]) -> usize {
    name.len() + value.len() + ENTRY_OVERHEAD
}

// Latest live entries of one name.
#[derive(Debug, Default)]
struct NameSlot {
    seq: u64,
    values: HashMap<Vec<u8>, u64>,
}

/// The encoder's copy of the dynamic table.
///
/// Every entry gets a sequence number on insertion. The newest entry has
/// absolute index 62, so an entry's index is derived from how many
/// entries were inserted after it. Lookups go through hash maps keyed by
/// name then value, pointing at sequence numbers.
#[derive(Debug)]
pub struct DynamicTable {
    entries: VecDeque<Entry>, // newest at front
    names: HashMap<Vec<u8>, NameSlot>,
    inserted: u64,
    size: usize,
    capacity: usize,
}

impl DynamicTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            names: HashMap::new(),
            inserted: 0,
            size: 0,
            capacity,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute index of the entry matching both name and value.
    pub fn find_exact(&self, name: &[u8], value: &[u8]) -> Option<usize> {
        let slot = self.names.get(name)?;
        let seq = *slot.values.get(value)?;
        Some(self.index_of(seq))
    }

    /// Absolute index of the newest entry with this name.
    pub fn find_name(&self, name: &[u8]) -> Option<usize> {
        self.names.get(name).map(|slot| self.index_of(slot.seq))
    }

    /// Entry at an absolute index.
    pub fn get(&self, index: usize) -> Option<(&[u8], &[u8])> {
        let pos = index.checked_sub(static_table::LEN + 1)?;
        self.entries
            .get(pos)
            .map(|e| (e.name.as_slice(), e.value.as_slice()))
    }

    /// Insert an entry, evicting the oldest ones to make room.
    ///
    /// An entry larger than the capacity empties the table and is not
    /// stored.
    pub fn add(&mut self, name: &[u8], value: &[u8]) {
        let size = entry_size(name, value);
        if size > self.capacity {
            debug!(
                "entry of {} bytes exceeds table capacity {}, table cleared",
                size, self.capacity
            );
            self.clear();
            return;
        }

        self.evict_to(self.capacity - size);

        self.inserted += 1;
        let seq = self.inserted;

        let slot = self.names.entry(name.to_vec()).or_default();
        slot.seq = seq;
        slot.values.insert(value.to_vec(), seq);

        self.entries.push_front(Entry {
            name: name.to_vec(),
            value: value.to_vec(),
            seq,
        });
        self.size += size;
    }

    /// Change the capacity and evict until the table fits.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict_to(capacity);
    }

    fn evict_to(&mut self, limit: usize) {
        while self.size > limit {
            let Some(entry) = self.entries.pop_back() else {
                break;
            };
            self.size -= entry.size();
            self.forget(&entry);
            debug!(
                "evict {:?} from dynamic table, size {}",
                String::from_utf8_lossy(&entry.name),
                self.size
            );
        }
    }

    // Drop the lookup keys of an evicted entry, unless a newer entry
    // took them over.
    fn forget(&mut self, entry: &Entry) {
        let Some(slot) = self.names.get_mut(&entry.name) else {
            return;
        };
        if slot.values.get(&entry.value) == Some(&entry.seq) {
            slot.values.remove(&entry.value);
        }
        if slot.seq == entry.seq {
            self.names.remove(&entry.name);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.names.clear();
        self.size = 0;
    }

    fn index_of(&self, seq: u64) -> usize {
        (self.inserted - seq) as usize + static_table::LEN + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first() {
        let mut table = DynamicTable::new(4096);
        table.add(b"a", b"1");
        table.add(b"b", b"2");

        assert_eq!(table.find_exact(b"b", b"2"), Some(62));
        assert_eq!(table.find_exact(b"a", b"1"), Some(63));
        assert_eq!(table.get(62), Some((&b"b"[..], &b"2"[..])));
        assert_eq!(table.get(63), Some((&b"a"[..], &b"1"[..])));
        assert_eq!(table.get(64), None);
        assert_eq!(table.get(61), None);
        assert_eq!(table.size(), 2 * 34);
    }

    #[test]
    fn name_lookup_prefers_newest() {
        let mut table = DynamicTable::new(4096);
        table.add(b"x", b"1");
        table.add(b"y", b"0");
        table.add(b"x", b"2");

        assert_eq!(table.find_name(b"x"), Some(62));
        assert_eq!(table.find_exact(b"x", b"1"), Some(64));
        assert_eq!(table.find_exact(b"x", b"3"), None);
        assert_eq!(table.find_name(b"z"), None);
    }

    #[test]
    fn evicts_oldest() {
        // room for two entries of 34 bytes
        let mut table = DynamicTable::new(70);
        table.add(b"a", b"1");
        table.add(b"b", b"2");
        table.add(b"c", b"3");

        assert_eq!(table.len(), 2);
        assert_eq!(table.find_exact(b"a", b"1"), None);
        assert_eq!(table.find_name(b"a"), None);
        assert_eq!(table.find_exact(b"b", b"2"), Some(63));
        assert_eq!(table.find_exact(b"c", b"3"), Some(62));
        assert!(table.size() <= table.capacity());
    }

    #[test]
    fn eviction_keeps_newer_same_name() {
        let mut table = DynamicTable::new(70);
        table.add(b"a", b"1");
        table.add(b"a", b"2");
        table.add(b"b", b"3");

        assert_eq!(table.find_exact(b"a", b"1"), None);
        assert_eq!(table.find_exact(b"a", b"2"), Some(63));
        assert_eq!(table.find_name(b"a"), Some(63));
    }

    #[test]
    fn oversized_entry_empties_table() {
        let mut table = DynamicTable::new(64);
        table.add(b"a", b"1");
        table.add(b"name", &[b'v'; 40]);

        assert!(table.is_empty());
        assert_eq!(table.size(), 0);
        assert_eq!(table.find_name(b"a"), None);
        assert_eq!(table.find_name(b"name"), None);

        // indices keep working after a clear
        table.add(b"c", b"3");
        assert_eq!(table.find_exact(b"c", b"3"), Some(62));
    }

    #[test]
    fn shrink_capacity() {
        let mut table = DynamicTable::new(4096);
        table.add(b"a", b"1");
        table.add(b"b", b"2");
        table.add(b"c", b"3");

        table.set_capacity(40);
        assert_eq!(table.len(), 1);
        assert_eq!(table.find_exact(b"c", b"3"), Some(62));

        table.set_capacity(0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 0);
    }
}
