use crate::sync::{sleep, RwLock};
use crate::types::stats::Stats;
use log::info;
use std::time::Duration;

fn stopped(stop: &RwLock<bool>) -> bool {
    *stop.read().expect("could not read the stop flag")
}

///Logs the shift stats every `interval` until `stop` is raised.
pub fn display_stats(stop: &RwLock<bool>, stats: &RwLock<Stats>, interval: Duration) {
    while !stopped(stop) {
        sleep(interval);
        let snapshot = stats.read().expect("could not read the stats").clone();
        info!("{}", snapshot);
    }
}
