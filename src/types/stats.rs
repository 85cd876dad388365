use crate::types::order::Order;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub orders_taken: u32,
    pub meals_prepared: u32,
    pub meals_served: u32,
    pub orders_rejected: u32,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "stats: {{orders taken:{}, meals prepared:{}, meals served:{}, orders rejected:{}}}",
            self.orders_taken, self.meals_prepared, self.meals_served, self.orders_rejected
        )
    }
}

///What the restaurant did during a shift, read once every worker has gone home.
pub struct ShiftReport {
    pub stats: Stats,
    pub served: Vec<Order>,
}
