pub mod customer;
pub mod order;
pub mod state;
pub mod stats;
