// ABOUTME: Fixed-capacity FIFO ring buffer used as the window of every buffered stage
// ABOUTME: Supports enqueue, dequeue, indexed peek and indexed removal without heap allocation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Bounded ring buffer.
//!
//! Storage is a `[T; N]` array owned inline, so a queue never allocates after
//! construction. Offsets passed to [`BoundedQueue::peek`] and
//! [`BoundedQueue::remove`] count from the oldest element.
//!
//! Stages are wired so that they never enqueue into a full queue and never
//! peek past `len`. Breaking that contract is a wiring bug, so the unchecked
//! operations panic instead of returning an error.

/// Fixed-capacity FIFO with indexed, non-destructive peek
#[derive(Debug, Clone)]
pub struct BoundedQueue<T, const N: usize> {
    items: [T; N],
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> BoundedQueue<T, N> {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Number of buffered elements
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no elements
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the queue is at capacity
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of elements
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    const fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % N
    }

    /// Append an element at the tail
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    #[track_caller]
    pub fn enqueue(&mut self, item: T) {
        assert!(self.len < N, "BoundedQueue overflow: capacity {N}");
        let tail = self.slot(self.len);
        self.items[tail] = item;
        self.len += 1;
    }

    /// Append an element, handing it back when the queue is full
    ///
    /// # Errors
    ///
    /// Returns the rejected element if the queue is at capacity.
    pub fn try_enqueue(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.enqueue(item);
        Ok(())
    }

    /// Remove and return the oldest element
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    #[track_caller]
    pub fn dequeue(&mut self) -> T {
        assert!(self.len > 0, "BoundedQueue underflow");
        let item = self.items[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        item
    }

    /// Borrow the element `offset` positions after the oldest
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len`.
    #[track_caller]
    pub fn peek(&self, offset: usize) -> &T {
        assert!(
            offset < self.len,
            "BoundedQueue peek at {offset} with {} buffered",
            self.len
        );
        &self.items[self.slot(offset)]
    }

    /// Borrow the element at `offset`, if buffered
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&T> {
        (offset < self.len).then(|| &self.items[self.slot(offset)])
    }

    /// Remove the element at `offset`, closing the gap
    ///
    /// Elements after `offset` move one position towards the head, so the
    /// relative order of the remaining elements is preserved.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len`.
    #[track_caller]
    pub fn remove(&mut self, offset: usize) -> T {
        assert!(
            offset < self.len,
            "BoundedQueue remove at {offset} with {} buffered",
            self.len
        );
        let item = self.items[self.slot(offset)];
        for index in offset..self.len - 1 {
            let (dst, src) = (self.slot(index), self.slot(index + 1));
            self.items[dst] = self.items[src];
        }
        self.len -= 1;
        item
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |offset| &self.items[self.slot(offset)])
    }
}
