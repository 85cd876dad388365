use log::{error, info};
use restaurant_service::host::load_customers;
use restaurant_service::{restaurant_start, ShiftConfig};

const DEFAULT_CUSTOMERS_FILE: &str = "./orders/customers.csv";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CUSTOMERS_FILE.to_string());
    let report = load_customers(&path)
        .and_then(|customers| restaurant_start(&ShiftConfig::default(), customers));
    match report {
        Ok(report) => info!("Shift over, {}", report.stats),
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}
