use anyhow::Result;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use crate::model::config::AppConfig;
use crate::model::ecosystem::{Ecosystem, TickReport};
use terrarium_data::{AnimalId, Species};

/// Samples of per-species counts kept for the population graph.
pub const HISTORY_LEN: usize = 300;

pub struct App {
    pub running: bool,
    pub paused: bool,
    /// Ticks actually simulated, paused frames excluded.
    pub tick_count: u64,
    pub ecosystem: Ecosystem,
    pub config: AppConfig,
    /// Sleep between ticks to hold `target_fps`.
    pub paced: bool,
    pub pop_history: VecDeque<BTreeMap<Species, usize>>,
    pub last_report: TickReport,
}

impl App {
    /// Reads `path`, writing the defaults there if it does not exist. A file
    /// that fails to parse or validate is reported and replaced by defaults
    /// for this run only.
    pub fn load_config(path: impl AsRef<Path>) -> AppConfig {
        let path = path.as_ref();
        if path.exists() {
            match AppConfig::load(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                    return AppConfig::default();
                }
            }
        }
        let default = AppConfig::default();
        if let Err(e) = default.save(path) {
            tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
        }
        default
    }

    pub fn new(config: AppConfig) -> Result<Self> {
        let ecosystem = Ecosystem::new(config.clone())?;
        let mut app = Self {
            running: true,
            paused: false,
            tick_count: 0,
            ecosystem,
            config,
            paced: true,
            pop_history: VecDeque::with_capacity(HISTORY_LEN),
            last_report: TickReport::default(),
        };
        app.record_history();
        Ok(app)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "Simulation pause toggled");
    }

    pub fn reset(&mut self) {
        self.ecosystem.reset();
        self.tick_count = 0;
        self.pop_history.clear();
        self.last_report = TickReport::default();
        self.record_history();
    }

    pub fn trigger_outbreak(&mut self) -> Option<AnimalId> {
        let patient_zero = self.ecosystem.trigger_outbreak();
        if patient_zero.is_none() {
            tracing::info!("Outbreak requested but no animals are alive");
        }
        patient_zero
    }

    /// Advances one tick unless paused.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.paused {
            return None;
        }
        let report = self.ecosystem.update();
        self.tick_count += 1;
        self.last_report = report;
        self.record_history();
        Some(report)
    }

    fn record_history(&mut self) {
        if self.pop_history.len() == HISTORY_LEN {
            self.pop_history.pop_front();
        }
        self.pop_history.push_back(self.ecosystem.animal_counts());
    }

    /// Status line for logs and headless output.
    #[must_use]
    pub fn status_line(&self) -> String {
        let weather = self.ecosystem.weather_report();
        format!(
            "t={}s pop={} breeding={} infected={} {} {} {:.1}C",
            self.ecosystem.elapsed_seconds(),
            self.ecosystem.total_population(),
            self.ecosystem.breeding_count(),
            self.ecosystem.infected_count(),
            weather.season.icon(),
            weather.weather.icon(),
            weather.temperature,
        )
    }
}
