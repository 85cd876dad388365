#[cfg(not(loom))]
use crate::error::Result;
use crate::error::ServiceError;
use crate::semaphore::{CustomSemaphore, SemaphoreGuard};
use crate::sync::{Mutex, MutexGuard};
use crate::types::state::BufferState;
#[cfg(not(loom))]
use std::time::Duration;

/// Outcome of a removal. `Drained` means the shift ended and nothing is left,
/// no item will ever arrive again.
#[derive(Debug, PartialEq, Eq)]
pub enum Removed<T> {
    Item(T),
    Drained,
}

/// Item handed back by an insert that could not go through.
#[derive(Debug)]
pub struct Rejected<T> {
    pub item: T,
    pub reason: ServiceError,
}

impl<T> Rejected<T> {
    pub fn into_inner(self) -> T {
        self.item
    }
}

struct Ring<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
    shutting_down: bool,
}

impl<T> Ring<T> {
    fn push(&mut self, item: T) {
        debug_assert!(self.slots[self.tail].is_none(), "overwriting a queued item");
        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
    }

    fn pop(&mut self) -> Option<T> {
        let item = self.slots[self.head].take()?;
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        Some(item)
    }
}

///Bounded FIFO ring shared by producers and consumers.
///
/// `queued` counts items a consumer may take and `free` counts empty slots.
/// Every `queued` permit matches an item in the ring, so a consumer holding
/// one always finds something to pop. Ending the shift closes both semaphores:
/// blocked inserters give up and blocked removers drain what is left, then see
/// `Removed::Drained`.
pub struct CircularBuffer<T> {
    ring: Mutex<Ring<T>>,
    queued: CustomSemaphore,
    free: CustomSemaphore,
}

impl<T> CircularBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "a circular buffer needs at least one slot");
        CircularBuffer {
            ring: Mutex::new(Ring {
                slots: (0..capacity).map(|_| None).collect(),
                head: 0,
                tail: 0,
                count: 0,
                shutting_down: false,
            }),
            queued: CustomSemaphore::with_max(0, capacity),
            free: CustomSemaphore::with_max(capacity, capacity),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring<T>> {
        self.ring.lock().expect("circular buffer mutex poisoned")
    }

    /// Adds `item` at the tail, waiting for a free slot if needed.
    pub fn insert(&self, item: T) -> std::result::Result<(), Rejected<T>> {
        match self.free.access() {
            Ok(slot) => self.enqueue(item, slot),
            Err(_) => Err(Rejected {
                item,
                reason: ServiceError::BufferClosed,
            }),
        }
    }

    /// Like `insert` but fails with `BufferFull` instead of waiting.
    pub fn try_insert(&self, item: T) -> std::result::Result<(), Rejected<T>> {
        match self.free.try_access() {
            Some(slot) => self.enqueue(item, slot),
            None => {
                let reason = if self.lock().shutting_down {
                    ServiceError::BufferClosed
                } else {
                    ServiceError::BufferFull
                };
                Err(Rejected { item, reason })
            }
        }
    }

    fn enqueue(
        &self,
        item: T,
        slot: SemaphoreGuard<'_>,
    ) -> std::result::Result<(), Rejected<T>> {
        let mut ring = self.lock();
        if ring.shutting_down {
            // slot goes back when the guard drops
            return Err(Rejected {
                item,
                reason: ServiceError::BufferClosed,
            });
        }
        ring.push(item);
        slot.keep();
        // released under the ring lock so that end_shift cannot close `queued`
        // between the push and its permit
        self.queued.release();
        Ok(())
    }

    /// Takes the head item, waiting while the buffer is empty and active.
    pub fn remove(&self) -> Removed<T> {
        match self.queued.acquire() {
            Ok(()) => Removed::Item(self.dequeue()),
            Err(_) => Removed::Drained,
        }
    }

    /// Like `remove` but gives up with `WaitTimedOut` after `timeout`.
    #[cfg(not(loom))]
    pub fn remove_timeout(&self, timeout: Duration) -> Result<Removed<T>> {
        match self.queued.acquire_timeout(timeout) {
            Ok(()) => Ok(Removed::Item(self.dequeue())),
            Err(ServiceError::InterruptedWait) => Ok(Removed::Drained),
            Err(err) => Err(err),
        }
    }

    fn dequeue(&self) -> T {
        let item = self
            .lock()
            .pop()
            .expect("queued permit granted with an empty ring");
        self.free.release();
        item
    }

    /// Stops accepting inserts and wakes everyone blocked on the buffer.
    /// Returns false if the shift had already ended.
    pub fn end_shift(&self) -> bool {
        let mut ring = self.lock();
        if ring.shutting_down {
            return false;
        }
        ring.shutting_down = true;
        self.queued.close();
        self.free.close();
        true
    }

    pub fn state(&self) -> BufferState {
        let ring = self.lock();
        match (ring.shutting_down, ring.count) {
            (false, _) => BufferState::Active,
            (true, 0) => BufferState::Drained,
            (true, _) => BufferState::ShuttingDown,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().count == 0
    }

    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }
}
