use crate::error::{Result, ServiceError};
use crate::sync::Mutex;
use crate::types::customer::Customer;
use std::fmt::{self, Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStatus {
    Placed,
    Ready,
    Served,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
        };
        write!(f, "{}", name)
    }
}

struct Progress {
    status: OrderStatus,
    prepared_by: Option<usize>,
    served_by: Option<usize>,
}

///A customer's meal on its way from the kitchen to the table.
/// Status only moves forward: placed, ready, served.
pub struct Order {
    customer_id: u32,
    meal_name: String,
    progress: Mutex<Progress>,
}

impl Order {
    pub fn new(customer_id: u32, meal_name: impl Into<String>) -> Self {
        Order {
            customer_id,
            meal_name: meal_name.into(),
            progress: Mutex::new(Progress {
                status: OrderStatus::Placed,
                prepared_by: None,
                served_by: None,
            }),
        }
    }

    pub fn for_customer(customer: &Customer) -> Self {
        Order::new(customer.id(), customer.order())
    }

    pub fn customer_id(&self) -> u32 {
        self.customer_id
    }

    pub fn meal_name(&self) -> &str {
        &self.meal_name
    }

    pub fn status(&self) -> OrderStatus {
        self.progress
            .lock()
            .expect("order progress mutex poisoned")
            .status
    }

    pub fn prepared_by(&self) -> Option<usize> {
        self.progress
            .lock()
            .expect("order progress mutex poisoned")
            .prepared_by
    }

    pub fn served_by(&self) -> Option<usize> {
        self.progress
            .lock()
            .expect("order progress mutex poisoned")
            .served_by
    }

    pub fn mark_ready(&self, chef_id: usize) -> Result<()> {
        self.advance(OrderStatus::Placed, OrderStatus::Ready, |progress| {
            progress.prepared_by = Some(chef_id)
        })
    }

    pub fn mark_served(&self, waiter_id: usize) -> Result<()> {
        self.advance(OrderStatus::Ready, OrderStatus::Served, |progress| {
            progress.served_by = Some(waiter_id)
        })
    }

    fn advance(
        &self,
        from: OrderStatus,
        to: OrderStatus,
        record: impl FnOnce(&mut Progress),
    ) -> Result<()> {
        let mut progress = self
            .progress
            .lock()
            .expect("order progress mutex poisoned");
        if progress.status != from {
            return Err(ServiceError::InvalidTransition {
                from: progress.status,
                to,
            });
        }
        progress.status = to;
        record(&mut *progress);
        Ok(())
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} for customer {} ({})",
            self.meal_name,
            self.customer_id,
            self.status()
        )
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::{Order, OrderStatus};
    use crate::error::ServiceError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_status_moves_forward() {
        let order = Order::new(7, "Lasagna");
        assert_eq!(OrderStatus::Placed, order.status());

        order.mark_ready(1).expect("placed order can be prepared");
        assert_eq!(OrderStatus::Ready, order.status());
        assert_eq!(Some(1), order.prepared_by());
        assert_eq!(None, order.served_by());

        order.mark_served(3).expect("ready order can be served");
        assert_eq!(OrderStatus::Served, order.status());
        assert_eq!(Some(3), order.served_by());
    }

    #[test]
    fn test_status_cannot_skip_or_go_back() {
        let order = Order::new(7, "Lasagna");
        assert!(matches!(
            order.mark_served(1),
            Err(ServiceError::InvalidTransition {
                from: OrderStatus::Placed,
                to: OrderStatus::Served
            })
        ));

        order.mark_ready(1).expect("placed order can be prepared");
        assert!(order.mark_ready(2).is_err());
        assert_eq!(Some(1), order.prepared_by());

        order.mark_served(1).expect("ready order can be served");
        assert!(order.mark_served(2).is_err());
        assert!(order.mark_ready(2).is_err());
        assert_eq!(OrderStatus::Served, order.status());
    }

    #[test]
    fn test_only_one_chef_prepares_an_order() {
        let order = Arc::new(Order::new(1, "Soup"));
        let chefs: Vec<_> = (0..8)
            .map(|id| {
                let order = order.clone();
                thread::spawn(move || order.mark_ready(id).is_ok())
            })
            .collect();
        let winners = chefs
            .into_iter()
            .map(|h| h.join().expect("chef panicked"))
            .filter(|won| *won)
            .count();
        assert_eq!(1, winners);
    }

    #[test]
    fn test_readers_see_monotonic_status() {
        let order = Arc::new(Order::new(1, "Soup"));
        let order_clone = order.clone();
        let reader = thread::spawn(move || {
            let mut last = OrderStatus::Placed;
            while last != OrderStatus::Served {
                let seen = order_clone.status();
                assert!(seen >= last, "status went from {} back to {}", last, seen);
                last = seen;
            }
        });
        order.mark_ready(1).expect("placed order can be prepared");
        order.mark_served(2).expect("ready order can be served");
        reader.join().expect("reader saw a status going backwards");
    }

    #[test]
    fn test_display() {
        let order = Order::new(4, "Risotto");
        assert_eq!("Risotto for customer 4 (placed)", order.to_string());
    }
}
