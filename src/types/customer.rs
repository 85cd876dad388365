use crate::error::{Result, ServiceError};
use chrono::NaiveTime;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

///Customer waiting to be seated. Customers are admitted earliest arrival first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    id: u32,
    arrival_time: NaiveTime,
    order: String,
}

impl Customer {
    pub fn new(id: u32, arrival_time: NaiveTime, order: impl Into<String>) -> Self {
        Customer {
            id,
            arrival_time,
            order: order.into(),
        }
    }

    /// Parses `id,HH:MM,meal`. The meal may itself contain commas.
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        let invalid = |reason: String| ServiceError::InvalidCustomer { line, reason };
        let fields: Vec<&str> = text.splitn(3, ',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(invalid(format!(
                "expected `id,HH:MM,meal` but got `{}`",
                text
            )));
        }
        let id = fields[0]
            .parse()
            .map_err(|_| invalid(format!("`{}` is not a customer id", fields[0])))?;
        let arrival_time = NaiveTime::parse_from_str(fields[1], "%H:%M")
            .map_err(|_| invalid(format!("`{}` is not an HH:MM arrival time", fields[1])))?;
        if fields[2].is_empty() {
            return Err(invalid("order is empty".to_string()));
        }
        Ok(Customer::new(id, arrival_time, fields[2]))
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn arrival_time(&self) -> NaiveTime {
        self.arrival_time
    }

    pub fn order(&self) -> &str {
        &self.order
    }
}

impl Ord for Customer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arrival_time
            .cmp(&other.arrival_time)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for Customer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "customer {} arrived {} ordering {}",
            self.id,
            self.arrival_time.format("%H:%M"),
            self.order
        )
    }
}
