//! Dense slot arena with free-list reuse.
//!
//! Backs the ordering structures: nodes live in a `Vec<Option<T>>` and are
//! addressed by stable [`SlotId`] handles instead of pointers or iterators,
//! so erasing one entry can never dangle another's locator. Freed slots are
//! recycled through a free list before the backing vector grows.

/// Stable handle into a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of `T` values addressed by [`SlotId`].
///
/// # Example
///
/// ```
/// use evictkit::ds::SlotArena;
///
/// let mut arena = SlotArena::new();
/// let id = arena.insert("payload");
/// assert_eq!(arena.get(id), Some(&"payload"));
/// assert_eq!(arena.remove(id), Some("payload"));
/// assert!(!arena.contains(id));
/// ```
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Inserts a value, reusing a freed slot when one is available.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Removes and returns the value at `id`, freeing the slot.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the value at `id`, if live.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the value at `id`, if live.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `id` refers to a live slot.
    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Returns the number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the backing vector capacity.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops all values and resets the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Iterates over live `(SlotId, &T)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);

        // Freed slot is recycled before the vector grows.
        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
    }

    #[test]
    fn slot_arena_stale_id_is_dead_after_remove() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7);
        arena.remove(id);
        assert!(!arena.contains(id));
        assert_eq!(arena.get(id), None);
        assert_eq!(arena.remove(id), None);
    }

    #[test]
    fn slot_arena_get_mut_and_clear() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        *arena.get_mut(id).unwrap() = 20;
        assert_eq!(arena.get(id), Some(&20));

        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(id));
    }

    #[test]
    fn slot_arena_iter_skips_holes() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let _b = arena.insert("b");
        let _c = arena.insert("c");
        arena.remove(a);

        let live: Vec<&str> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(live, vec!["b", "c"]);
    }
}
