//! Restaurant service simulation.
//!
//! Customers are seated by a host, chefs cook their orders and waiters serve
//! them. Stations hand orders to each other through bounded
//! [`CircularBuffer`]s gated by a [`CustomSemaphore`].

use crate::sync::{thread, Arc, Mutex, RwLock};
use log::info;

pub mod chef;
pub mod circular_buffer;
pub mod config;
pub mod display_stats;
pub mod error;
pub mod host;
pub mod semaphore;
pub mod types;
pub mod waiter;

pub use circular_buffer::{CircularBuffer, Rejected, Removed};
pub use config::{ShiftConfig, StationPace};
pub use error::{Result, ServiceError};
pub use semaphore::CustomSemaphore;

use chef::Chef;
use display_stats::display_stats;
use host::host;
use types::customer::Customer;
use types::stats::{ShiftReport, Stats};
use waiter::Waiter;

mod sync {
    use std::time::Duration;

    #[cfg(not(loom))]
    pub(crate) use std::sync::atomic::{AtomicBool, Ordering};
    #[cfg(not(loom))]
    pub(crate) use std::sync::{Arc, Condvar, Mutex, MutexGuard, RwLock};

    #[cfg(loom)]
    pub(crate) use loom::sync::atomic::{AtomicBool, Ordering};
    #[cfg(loom)]
    pub(crate) use loom::sync::{Arc, Condvar, Mutex, MutexGuard, RwLock};

    #[cfg(not(loom))]
    pub(crate) use std::thread;

    #[cfg(loom)]
    pub(crate) use loom::thread;

    #[cfg(not(loom))]
    pub(crate) fn sleep(d: Duration) {
        thread::sleep(d);
    }

    #[cfg(loom)]
    pub(crate) fn sleep(_d: Duration) {
        loom::thread::yield_now();
    }
}

fn join_all(handles: Vec<thread::JoinHandle<()>>, role: &'static str) -> Result<()> {
    let panicked = handles
        .into_iter()
        .map(|handle| handle.join())
        .filter(|joined| joined.is_err())
        .count();
    if panicked > 0 {
        return Err(ServiceError::WorkerPanicked(role));
    }
    Ok(())
}

///Runs a whole shift.
/// Chefs and waiters start first, the host seats every customer, then the
/// kitchen closes, the chefs finish what was ordered, and only after that the
/// waiters are told to clear the pass and go home.
pub fn restaurant_start(config: &ShiftConfig, customers: Vec<Customer>) -> Result<ShiftReport> {
    config.validate()?;

    let placed_orders = Arc::new(CircularBuffer::new(config.order_capacity));
    let ready_orders = Arc::new(CircularBuffer::new(config.ready_capacity));
    let stats_ref = Arc::new(RwLock::new(Stats::default()));
    let served_ref = Arc::new(Mutex::new(Vec::new()));

    let chefs: Vec<Arc<Chef>> = (1..=config.chefs)
        .map(|id| Arc::new(Chef::new(id, placed_orders.clone(), ready_orders.clone())))
        .collect();
    let waiters: Vec<Arc<Waiter>> = (1..=config.waiters)
        .map(|id| Arc::new(Waiter::new(id, ready_orders.clone())))
        .collect();

    let chef_threads: Vec<_> = chefs
        .iter()
        .map(|chef| Chef::start(chef, config.preparation, stats_ref.clone()))
        .collect();
    let waiter_threads: Vec<_> = waiters
        .iter()
        .map(|waiter| {
            Waiter::start(waiter, config.serving, stats_ref.clone(), served_ref.clone())
        })
        .collect();
    info!(
        "Shift started with {} chefs and {} waiters",
        chefs.len(),
        waiters.len()
    );

    let end_of_shift = Arc::new(RwLock::new(false));
    let end_of_shift_clone = end_of_shift.clone();
    let stats_clone = stats_ref.clone();
    let interval = config.stats_interval;
    let stats_thread = thread::spawn(move || {
        display_stats(&end_of_shift_clone, &stats_clone, interval);
    });

    host(&placed_orders, customers, &stats_ref);

    chefs.iter().for_each(|chef| chef.end_shift());
    let kitchen = join_all(chef_threads, "chef");
    info!("Kitchen closed, placed orders are {}", placed_orders.state());
    // the waiters always get to clear the pass, even if a chef went down
    waiters.iter().for_each(|waiter| waiter.end_shift());
    let floor = join_all(waiter_threads, "waiter");

    *end_of_shift.write().expect("could not write the stop flag") = true;
    stats_thread
        .join()
        .map_err(|_| ServiceError::WorkerPanicked("stats"))?;
    kitchen?;
    floor?;

    let stats = stats_ref.read().expect("could not read the stats").clone();
    let served = std::mem::take(
        &mut *served_ref
            .lock()
            .expect("could not lock the served orders"),
    );
    Ok(ShiftReport { stats, served })
}
