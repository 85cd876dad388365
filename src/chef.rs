use crate::circular_buffer::{CircularBuffer, Removed};
use crate::config::StationPace;
use crate::sync::{sleep, thread, Arc, AtomicBool, Ordering, RwLock};
use crate::types::order::Order;
use crate::types::stats::Stats;
use log::{info, warn};

///Cooks placed orders and puts the finished meals on the pass.
/// Consumer of the placed orders buffer and producer of the ready one.
pub struct Chef {
    id: usize,
    placed_orders: Arc<CircularBuffer<Order>>,
    ready_orders: Arc<CircularBuffer<Order>>,
    shift_ended: AtomicBool,
}

impl Chef {
    pub fn new(
        id: usize,
        placed_orders: Arc<CircularBuffer<Order>>,
        ready_orders: Arc<CircularBuffer<Order>>,
    ) -> Self {
        Chef {
            id,
            placed_orders,
            ready_orders,
            shift_ended: AtomicBool::new(false),
        }
    }

    /// Spawns the cooking loop on its own thread.
    pub fn start(
        chef: &Arc<Chef>,
        pace: StationPace,
        stats: Arc<RwLock<Stats>>,
    ) -> thread::JoinHandle<()> {
        let chef = chef.clone();
        thread::spawn(move || chef.cook(pace, &stats))
    }

    /// Stops taking new orders. Orders already queued or on the stove are
    /// still finished. The pass is left open for the waiters.
    pub fn end_shift(&self) {
        self.placed_orders.end_shift();
        if !self.shift_ended.swap(true, Ordering::SeqCst) {
            info!("Chef {} has ended the shift", self.id);
        }
    }

    fn shift_ended(&self) -> bool {
        self.shift_ended.load(Ordering::SeqCst)
    }

    fn cook(&self, pace: StationPace, stats: &RwLock<Stats>) {
        let mut rng = rand::thread_rng();
        while !self.shift_ended() || !self.placed_orders.is_empty() {
            let order = match self.placed_orders.remove() {
                Removed::Item(order) => order,
                Removed::Drained => break,
            };
            info!("Chef {} is preparing {}", self.id, order);

            sleep(pace.pick(&mut rng));

            if let Err(err) = order.mark_ready(self.id) {
                warn!("Chef {} could not prepare {}: {}", self.id, order, err);
                continue;
            }
            info!("Chef {} has prepared {}", self.id, order);
            stats
                .write()
                .expect("could not write the stats")
                .meals_prepared += 1;

            if let Err(rejected) = self.ready_orders.insert(order) {
                let order = rejected.item;
                warn!(
                    "Chef {} could not put {} on the pass: {}",
                    self.id,
                    order,
                    rejected.reason
                );
                stats
                    .write()
                    .expect("could not write the stats")
                    .orders_rejected += 1;
            }
        }
        info!("Chef {} leaves the kitchen", self.id);
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::Chef;
    use crate::circular_buffer::{CircularBuffer, Removed};
    use crate::config::StationPace;
    use crate::types::order::{Order, OrderStatus};
    use crate::types::stats::Stats;
    use std::sync::{Arc, RwLock};
    use std::time::Duration;

    fn instant_pace() -> StationPace {
        StationPace::new(3, 8).with_minute(Duration::ZERO)
    }

    fn place(buffer: &CircularBuffer<Order>, customer_id: u32, meal: &str) {
        if buffer.insert(Order::new(customer_id, meal)).is_err() {
            panic!("orders closed before the shift ended");
        }
    }

    #[test]
    fn test_prepares_orders_onto_the_pass() {
        let _ = env_logger::builder().is_test(true).try_init();
        let placed = Arc::new(CircularBuffer::new(4));
        let ready = Arc::new(CircularBuffer::new(4));
        let stats = Arc::new(RwLock::new(Stats::default()));
        let chef = Arc::new(Chef::new(2, placed.clone(), ready.clone()));

        place(&placed, 1, "Ramen");
        place(&placed, 2, "Gyoza");
        place(&placed, 3, "Udon");
        let handle = Chef::start(&chef, instant_pace(), stats.clone());
        chef.end_shift();
        handle.join().expect("chef panicked");

        ready.end_shift();
        let mut meals = Vec::new();
        while let Removed::Item(order) = ready.remove() {
            assert_eq!(OrderStatus::Ready, order.status());
            assert_eq!(Some(2), order.prepared_by());
            meals.push(order.meal_name().to_string());
        }
        assert_eq!(vec!["Ramen", "Gyoza", "Udon"], meals);
        assert_eq!(3, stats.read().expect("stats").meals_prepared);
    }

    #[test]
    fn test_end_shift_leaves_the_pass_open() {
        let placed = Arc::new(CircularBuffer::new(1));
        let ready: Arc<CircularBuffer<Order>> = Arc::new(CircularBuffer::new(1));
        let chef = Chef::new(1, placed.clone(), ready.clone());
        chef.end_shift();
        assert!(ready.try_insert(Order::new(1, "Toast")).is_ok());
        assert!(placed.try_insert(Order::new(2, "Eggs")).is_err());
    }

    #[test]
    fn test_closed_pass_counts_rejections() {
        let _ = env_logger::builder().is_test(true).try_init();
        let placed = Arc::new(CircularBuffer::new(2));
        let ready = Arc::new(CircularBuffer::new(2));
        let stats = Arc::new(RwLock::new(Stats::default()));
        let chef = Arc::new(Chef::new(1, placed.clone(), ready.clone()));

        ready.end_shift();
        place(&placed, 1, "Curry");
        place(&placed, 2, "Naan");
        let handle = Chef::start(&chef, instant_pace(), stats.clone());
        chef.end_shift();
        handle.join().expect("chef panicked");

        let stats = stats.read().expect("stats");
        assert_eq!(2, stats.meals_prepared);
        assert_eq!(2, stats.orders_rejected);
        assert!(matches!(ready.remove(), Removed::Drained));
    }
}
