use crate::types::order::OrderStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("buffer is full")]
    BufferFull,

    #[error("buffer no longer accepts items, the shift has ended")]
    BufferClosed,

    #[error("wait interrupted, no permit will ever become available")]
    InterruptedWait,

    #[error("wait timed out")]
    WaitTimedOut,

    #[error("order cannot go from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("invalid customer on line {line}: {reason}")]
    InvalidCustomer { line: usize, reason: String },

    #[error("invalid shift configuration: {0}")]
    InvalidConfig(String),

    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),

    #[error("could not read customers: {0}")]
    Io(#[from] std::io::Error),
}
