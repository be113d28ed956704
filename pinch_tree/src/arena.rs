//! Slot arena for high-churn particles.
//!
//! Slots keep their index for the lifetime of the occupant; freed slots go
//! onto a free list and are reused before the backing `Vec` grows, so a
//! steady spawn/expire cycle stops allocating once warmed up.

#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free:  Vec<usize>,
    live:  usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena { slots: Vec::new(), free: Vec::new(), live: 0 }
    }
}

impl<T> Arena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Arena { slots: Vec::with_capacity(capacity), free: Vec::new(), live: 0 }
    }

    /// Store `value`, returning its slot index.
    pub fn insert(&mut self, value: T) -> usize {
        self.live += 1;
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = Some(value);
                i
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        }
    }

    pub fn len(&self)      -> usize { self.live }
    pub fn is_empty(&self) -> bool  { self.live == 0 }

    /// Number of slots ever allocated (occupied or free).
    pub fn slot_count(&self) -> usize { self.slots.len() }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Visit every occupant; those for which `keep` returns `false` are
    /// removed and their slots recycled.
    pub fn retain_mut(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(value) = slot {
                if !keep(value) {
                    *slot = None;
                    self.free.push(i);
                    self.live -= 1;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
