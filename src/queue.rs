use crate::error::{Operation, QueueError};

/// Fixed-capacity FIFO queue over a circular slot buffer.
///
/// Inserts go to `tail`, removals come from `head`; both cursors wrap at
/// `cap`. Every operation is O(1) and nothing is ever shifted. The queue
/// never grows: a full queue rejects inserts (`add` errors, `offer` returns
/// `false`) until something is removed.
///
/// Front access and removal return `Option`, so a queue of `Option<U>`
/// stays unambiguous: `Some(&None)` is a stored `None`, `None` is "empty".
#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    data: Vec<Option<T>>,
    head: usize,
    tail: usize,
    len: usize,
    cap: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(cap: usize) -> Result<Self, QueueError> {
        if cap == 0 {
            return Err(QueueError::InvalidCapacity(0));
        }
        Ok(Self { data: empty_slots(cap), head: 0, tail: 0, len: 0, cap })
    }

    /// Like `new`, for capacities that arrive as signed integers
    /// (scripts, config). Anything `<= 0` is rejected.
    pub fn with_signed_capacity(cap: i64) -> Result<Self, QueueError> {
        match usize::try_from(cap) {
            Ok(n) if n > 0 => Self::new(n),
            _ => Err(QueueError::InvalidCapacity(cap)),
        }
    }

    // ── Insertion ───────────────────────────────────────────────────

    /// Append `val`, failing with `Full` if there is no free slot.
    pub fn add(&mut self, val: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full { capacity: self.cap });
        }
        self.data[self.tail] = Some(val);
        self.tail = (self.tail + 1) % self.cap;
        self.len += 1;
        Ok(())
    }

    /// Append `val` if there is room. Returns whether it was stored.
    pub fn offer(&mut self, val: T) -> bool {
        self.add(val).is_ok()
    }

    // ── Front access ────────────────────────────────────────────────

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.data[self.head].as_ref()
    }

    pub fn element(&self) -> Result<&T, QueueError> {
        self.peek().ok_or(QueueError::Empty)
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Take the oldest element out, leaving its slot empty.
    pub fn poll(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let val = self.data[self.head].take();
        self.head = (self.head + 1) % self.cap;
        self.len -= 1;
        val
    }

    pub fn remove(&mut self) -> Result<T, QueueError> {
        self.poll().ok_or(QueueError::Empty)
    }

    // ── Snapshot / reset ────────────────────────────────────────────

    /// Occupied slots, oldest first.
    pub fn to_refs(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        for i in 0..self.len {
            let idx = (self.head + i) % self.cap;
            if let Some(v) = self.data[idx].as_ref() {
                out.push(v);
            }
        }
        out
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.to_refs().into_iter().cloned().collect()
    }

    /// Drop every element and reset the cursors; capacity is kept.
    pub fn clear(&mut self) {
        self.data = empty_slots(self.cap);
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    // ── Inspection ──────────────────────────────────────────────────

    pub fn capacity(&self) -> usize { self.cap }
    pub fn remaining_space(&self) -> usize { self.cap - self.len }
    pub fn is_full(&self) -> bool { self.len >= self.cap }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn len(&self) -> usize { self.len }

    // ── Unsupported collection surface ──────────────────────────────
    //
    // These never touch the queue; they exist so callers get a clear
    // `Unsupported` instead of a missing method or a silent no-op.

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, _items: I) -> Result<bool, QueueError> {
        Err(QueueError::Unsupported(Operation::AddAll))
    }

    pub fn contains(&self, _val: &T) -> Result<bool, QueueError> {
        Err(QueueError::Unsupported(Operation::Contains))
    }

    pub fn contains_all(&self, _vals: &[T]) -> Result<bool, QueueError> {
        Err(QueueError::Unsupported(Operation::ContainsAll))
    }

    pub fn iter(&self) -> Result<std::iter::Empty<&T>, QueueError> {
        Err(QueueError::Unsupported(Operation::Iter))
    }

    pub fn remove_item(&mut self, _val: &T) -> Result<bool, QueueError> {
        Err(QueueError::Unsupported(Operation::RemoveItem))
    }

    pub fn remove_all(&mut self, _vals: &[T]) -> Result<bool, QueueError> {
        Err(QueueError::Unsupported(Operation::RemoveAll))
    }

    pub fn retain_all(&mut self, _vals: &[T]) -> Result<bool, QueueError> {
        Err(QueueError::Unsupported(Operation::RetainAll))
    }

    pub fn copy_to_slice(&self, _dest: &mut [T]) -> Result<usize, QueueError> {
        Err(QueueError::Unsupported(Operation::CopyToSlice))
    }
}

fn empty_slots<T>(cap: usize) -> Vec<Option<T>> {
    (0..cap).map(|_| None).collect()
}
