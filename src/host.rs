use crate::circular_buffer::CircularBuffer;
use crate::error::Result;
use crate::sync::RwLock;
use crate::types::customer::Customer;
use crate::types::order::Order;
use crate::types::stats::Stats;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

///Taken from <https://doc.rust-lang.org/rust-by-example/std_misc/file/read_lines.html>
fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

/// Reads one customer per `id,HH:MM,meal` line. Blank lines and lines starting
/// with `#` are skipped.
pub fn load_customers<P: AsRef<Path>>(path: P) -> Result<Vec<Customer>> {
    let mut customers = Vec::new();
    for (index, line) in read_lines(path)?.enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        customers.push(Customer::parse(index + 1, text)?);
    }
    Ok(customers)
}

/// Seats customers earliest arrival first and places their orders with the
/// kitchen, waiting whenever the order rail is full.
/// Behaves as the producer of the placed orders buffer.
pub fn host(
    placed_orders: &CircularBuffer<Order>,
    mut customers: Vec<Customer>,
    stats: &RwLock<Stats>,
) {
    customers.sort();
    for customer in customers {
        info!("Seating {}", customer);
        match placed_orders.insert(Order::for_customer(&customer)) {
            Ok(()) => {
                stats
                    .write()
                    .expect("could not write the stats")
                    .orders_taken += 1;
            }
            Err(rejected) => {
                warn!(
                    "Kitchen refused {} for customer {}: {}",
                    customer.order(),
                    customer.id(),
                    rejected.reason
                );
                stats
                    .write()
                    .expect("could not write the stats")
                    .orders_rejected += 1;
            }
        }
    }
    info!("Host stops seating customers");
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::{host, load_customers};
    use crate::circular_buffer::{CircularBuffer, Removed};
    use crate::error::ServiceError;
    use crate::types::stats::Stats;
    use std::sync::{Arc, RwLock};
    use std::thread;

    #[test]
    fn test_load_customers() {
        let customers = load_customers("./orders/customers.csv").expect("fixture is valid");
        assert_eq!(10, customers.len());
        assert_eq!(1, customers[0].id());
        assert_eq!("Fish, chips and peas", customers[6].order());
    }

    #[test]
    fn test_load_customers_reports_bad_line() {
        match load_customers("./orders/invalid.csv") {
            Err(ServiceError::InvalidCustomer { line, .. }) => assert_eq!(2, line),
            Err(other) => panic!("unexpected error {}", other),
            Ok(_) => panic!("invalid file was accepted"),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_customers("./orders/missing.csv"),
            Err(ServiceError::Io(_))
        ));
    }

    #[test]
    fn test_orders_placed_by_arrival() {
        let _ = env_logger::builder().is_test(true).try_init();
        let customers = load_customers("./orders/customers.csv").expect("fixture is valid");
        let placed = Arc::new(CircularBuffer::new(3));
        let stats = Arc::new(RwLock::new(Stats::default()));

        let placed_clone = placed.clone();
        let stats_clone = stats.clone();
        let host_thread = thread::spawn(move || {
            host(&placed_clone, customers, &stats_clone);
            placed_clone.end_shift();
        });

        let mut customer_ids = Vec::new();
        while let Removed::Item(order) = placed.remove() {
            customer_ids.push(order.customer_id());
        }
        host_thread.join().expect("host panicked");

        assert_eq!(vec![2, 1, 4, 5, 3, 7, 6, 9, 8, 10], customer_ids);
        assert_eq!(10, stats.read().expect("stats").orders_taken);
    }

    #[test]
    fn test_closed_kitchen_rejects_orders() {
        let customers = load_customers("./orders/customers.csv").expect("fixture is valid");
        let placed = CircularBuffer::new(3);
        let stats = RwLock::new(Stats::default());
        placed.end_shift();
        host(&placed, customers, &stats);
        let stats = stats.read().expect("stats");
        assert_eq!(0, stats.orders_taken);
        assert_eq!(10, stats.orders_rejected);
    }
}
