use crate::error::{Result, ServiceError};
use crate::sync::{Condvar, Mutex, MutexGuard};
#[cfg(not(loom))]
use std::time::{Duration, Instant};

struct Permits {
    available: usize,
    closed: bool,
}

///Counting semaphore built on a mutex and a condvar.
/// `release` wakes a single waiting `acquire`, `close` wakes all of them.
pub struct CustomSemaphore {
    permits: Mutex<Permits>,
    released: Condvar,
    max_permits: usize,
}

impl CustomSemaphore {
    pub fn new(initial: usize) -> Self {
        Self::with_max(initial, usize::MAX)
    }

    /// Semaphore whose count may never be released above `max_permits`.
    pub fn with_max(initial: usize, max_permits: usize) -> Self {
        assert!(
            initial <= max_permits,
            "initial permits {} exceed the maximum of {}",
            initial,
            max_permits
        );
        CustomSemaphore {
            permits: Mutex::new(Permits {
                available: initial,
                closed: false,
            }),
            released: Condvar::new(),
            max_permits,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Permits> {
        self.permits
            .lock()
            .expect("semaphore permits mutex poisoned")
    }

    /// Blocks until a permit is free and takes it.
    ///
    /// Only fails once the semaphore is closed and every remaining permit has
    /// been handed out.
    pub fn acquire(&self) -> Result<()> {
        let mut permits = self.lock();
        while permits.available == 0 && !permits.closed {
            permits = self
                .released
                .wait(permits)
                .expect("semaphore condvar poisoned");
        }
        take(&mut permits)
    }

    #[cfg(not(loom))]
    pub fn acquire_timeout(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut permits = self.lock();
        while permits.available == 0 && !permits.closed {
            let now = Instant::now();
            if now >= deadline {
                return Err(ServiceError::WaitTimedOut);
            }
            let (guard, _) = self
                .released
                .wait_timeout(permits, deadline - now)
                .expect("semaphore condvar poisoned");
            permits = guard;
        }
        take(&mut permits)
    }

    /// Takes a permit only if one is free right now.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.lock();
        if permits.available == 0 {
            return false;
        }
        permits.available -= 1;
        true
    }

    pub fn release(&self) {
        {
            let mut permits = self.lock();
            assert!(
                permits.available < self.max_permits,
                "released more permits than the maximum of {}",
                self.max_permits
            );
            permits.available += 1;
        }
        self.released.notify_one();
    }

    /// Scoped acquire: the permit goes back when the guard drops.
    pub fn access(&self) -> Result<SemaphoreGuard<'_>> {
        self.acquire()?;
        Ok(SemaphoreGuard { semaphore: self })
    }

    pub fn try_access(&self) -> Option<SemaphoreGuard<'_>> {
        if self.try_acquire() {
            Some(SemaphoreGuard { semaphore: self })
        } else {
            None
        }
    }

    /// Wakes every waiter. Permits still held keep being handed out, after
    /// that `acquire` fails instead of blocking. Idempotent.
    pub fn close(&self) {
        self.lock().closed = true;
        self.released.notify_all();
    }

    /// Diagnostic snapshot, stale as soon as it returns.
    pub fn current_permits(&self) -> usize {
        self.lock().available
    }
}

fn take(permits: &mut Permits) -> Result<()> {
    if permits.available == 0 {
        // only reachable once closed
        return Err(ServiceError::InterruptedWait);
    }
    permits.available -= 1;
    Ok(())
}

///Permit taken through `access`, returned when it goes out of scope.
pub struct SemaphoreGuard<'a> {
    semaphore: &'a CustomSemaphore,
}

impl SemaphoreGuard<'_> {
    /// Hands the permit on instead of releasing it; someone else releases it
    /// later.
    pub fn keep(self) {
        std::mem::forget(self);
    }
}

impl Drop for SemaphoreGuard<'_> {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}
