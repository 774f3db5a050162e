//! Example that demonstrates basic usage of `stopwatches` with trace logging enabled.
//!
//! Several worker threads time their own work using stopwatches created in a shared registry,
//! after which the main thread prints a summary of every stopwatch.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that doesn't need production-level safety"
)]

use std::thread;
use std::time::Duration;

use stopwatches::{Registry, Stopwatch};
use tracing::Level;

fn work(stopwatch: &Stopwatch, laps: u64) -> Result<(), stopwatches::Error> {
    stopwatch.start()?;
    for _ in 0..laps {
        thread::sleep(Duration::from_millis(laps * 10));
        stopwatch.lap()?;
    }

    // Time spent stopped is not counted toward the final lap.
    stopwatch.stop()?;
    thread::sleep(Duration::from_millis(50));
    stopwatch.start()?;
    stopwatch.stop()?;

    Ok(())
}

fn main() -> Result<(), stopwatches::Error> {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    let registry = Registry::new();

    let stopwatches = (1..=3_u64)
        .map(|worker| Ok((worker, registry.create(format!("worker_{worker}"))?)))
        .collect::<Result<Vec<_>, stopwatches::Error>>()?;

    thread::scope(|scope| {
        let handles: Vec<_> = stopwatches
            .iter()
            .map(|(laps, stopwatch)| scope.spawn(move || work(stopwatch, *laps)))
            .collect();

        handles
            .into_iter()
            .try_for_each(|handle| handle.join().expect("worker thread panicked"))
    })?;

    for stopwatch in registry.list() {
        println!("{stopwatch}");
    }

    Ok(())
}
