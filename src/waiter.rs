use crate::circular_buffer::{CircularBuffer, Removed};
use crate::config::StationPace;
use crate::sync::{sleep, thread, Arc, AtomicBool, Mutex, Ordering, RwLock};
use crate::types::order::Order;
use crate::types::stats::Stats;
use log::{info, warn};

///Takes meals off the pass and brings them to the table.
/// Acts as the consumer of the ready orders buffer.
pub struct Waiter {
    id: usize,
    ready_orders: Arc<CircularBuffer<Order>>,
    shift_ended: AtomicBool,
}

impl Waiter {
    pub fn new(id: usize, ready_orders: Arc<CircularBuffer<Order>>) -> Self {
        Waiter {
            id,
            ready_orders,
            shift_ended: AtomicBool::new(false),
        }
    }

    /// Spawns the serving loop. Served orders end up in `served`.
    pub fn start(
        waiter: &Arc<Waiter>,
        pace: StationPace,
        stats: Arc<RwLock<Stats>>,
        served: Arc<Mutex<Vec<Order>>>,
    ) -> thread::JoinHandle<()> {
        let waiter = waiter.clone();
        thread::spawn(move || waiter.serve(pace, &stats, &served))
    }

    /// Closes the pass and tells the loop to stop once it is empty. Safe to
    /// call more than once.
    pub fn end_shift(&self) {
        // the buffer is closed before the flag is raised, so a loop that sees
        // the flag together with an empty buffer knows nothing else is coming
        self.ready_orders.end_shift();
        if !self.shift_ended.swap(true, Ordering::SeqCst) {
            info!("Waiter {} has ended the shift", self.id);
        }
    }

    fn shift_ended(&self) -> bool {
        self.shift_ended.load(Ordering::SeqCst)
    }

    fn serve(&self, pace: StationPace, stats: &RwLock<Stats>, served: &Mutex<Vec<Order>>) {
        let mut rng = rand::thread_rng();
        while !self.shift_ended() || !self.ready_orders.is_empty() {
            let order = match self.ready_orders.remove() {
                Removed::Item(order) => order,
                Removed::Drained => break,
            };
            info!("Waiter {} is serving {}", self.id, order);

            sleep(pace.pick(&mut rng));

            if let Err(err) = order.mark_served(self.id) {
                warn!("Waiter {} could not serve {}: {}", self.id, order, err);
                continue;
            }
            info!("Waiter {} has served {}", self.id, order);
            register_served(order, stats, served);
        }
        info!("Waiter {} leaves the floor", self.id);
    }
}

///Records a delivered order.
fn register_served(order: Order, stats: &RwLock<Stats>, served: &Mutex<Vec<Order>>) {
    stats
        .write()
        .expect("could not write the stats")
        .meals_served += 1;
    served
        .lock()
        .expect("could not lock the served orders")
        .push(order);
}
