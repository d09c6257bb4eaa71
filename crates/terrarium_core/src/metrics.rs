//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and counters for monitoring simulation
//! throughput and ecological churn (births, deaths, predation).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const BIRTHS: &str = "births";
pub const PREDATIONS: &str = "predations";
pub const NATURAL_DEATHS: &str = "natural_deaths";
pub const DISEASE_DEATHS: &str = "disease_deaths";
pub const INFECTIONS: &str = "infections";
pub const OFFSPRING_DISCARDED: &str = "offspring_discarded";

/// Metrics collector for simulation statistics.
pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    block_count: AtomicU64,
    total_tick_nanos: AtomicU64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            block_count: AtomicU64::new(0),
            total_tick_nanos: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, population: usize, blocks: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.population.store(population as u64, Ordering::Relaxed);
        self.block_count.store(blocks as u64, Ordering::Relaxed);
        self.total_tick_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        // Log at info level every 1000 ticks
        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % 1000 == 0 {
            tracing::info!(
                tick = tick,
                population = population,
                blocks = blocks,
                avg_tick_us = self.average_tick().as_micros() as u64,
                births = self.counter(BIRTHS),
                predations = self.counter(PREDATIONS),
                disease_deaths = self.counter(DISEASE_DEATHS),
                "Simulation tick"
            );
        }
    }

    /// Adds `amount` to a named counter.
    pub fn add(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    pub fn increment_counter(&self, name: &str) {
        self.add(name, 1);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn block_count(&self) -> u64 {
        self.block_count.load(Ordering::Relaxed)
    }

    /// Mean wall-clock duration of recorded ticks.
    #[must_use]
    pub fn average_tick(&self) -> Duration {
        let ticks = self.tick_count().max(1);
        Duration::from_nanos(self.total_tick_nanos.load(Ordering::Relaxed) / ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Clears every counter, keeping the start time.
    pub fn reset(&self) {
        self.tick_count.store(0, Ordering::Relaxed);
        self.population.store(0, Ordering::Relaxed);
        self.block_count.store(0, Ordering::Relaxed);
        self.total_tick_nanos.store(0, Ordering::Relaxed);
        self.counters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Logs a simulation event.
    pub fn log_event(&self, event_type: &str, details: &str) {
        tracing::info!(
            event_type = event_type,
            details = details,
            "Simulation event"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
