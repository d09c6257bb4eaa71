//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `terrarium.toml` file. Every constant the simulation uses is reachable
//! from here, and `AppConfig::default()` reproduces the stock ecosystem.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `terrarium.toml` file (overrides defaults)
//! 3. Command-line overrides (seed, tick budget)
//!
//! ## Example `terrarium.toml`
//!
//! ```toml
//! target_fps = 60
//!
//! [world]
//! seed = 7
//! max_population = 2000
//!
//! [[world.initial_animals]]
//! species = "rabbit"
//! count = 4
//!
//! [terrain]
//! seed = 42
//! tree_chance = 0.08
//!
//! [disease]
//! infection_chance = 0.05
//! ```

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use terrarium_data::Species;

/// A batch of founders of one species.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpawnGroup {
    pub species: Species,
    pub count: usize,
}

impl SpawnGroup {
    #[must_use]
    pub const fn new(species: Species, count: usize) -> Self {
        Self { species, count }
    }
}

/// World-level simulation configuration.
///
/// Defines where animals spawn, how far they may roam, and the population
/// cap that bounds per-tick cost.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for behavior randomness. `None` draws from entropy.
    pub seed: Option<u64>,
    pub initial_animals: Vec<SpawnGroup>,
    pub spawn_radius: f64,
    pub spawn_height: f64,
    /// Horizontal clamp applied by random walks: x and z stay in `[-bound, bound]`.
    pub roam_bound: f64,
    pub max_altitude: f64,
    pub max_population: usize,
    pub lake_extent: i32,
    pub lake_radius: f64,
    pub lake_depth: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let initial_animals = vec![
            SpawnGroup::new(Species::Rabbit, 4),
            SpawnGroup::new(Species::Deer, 2),
            SpawnGroup::new(Species::Mouse, 3),
            SpawnGroup::new(Species::Bird, 3),
            SpawnGroup::new(Species::Eagle, 1),
            SpawnGroup::new(Species::Duck, 2),
            SpawnGroup::new(Species::Wolf, 1),
            SpawnGroup::new(Species::Fox, 1),
            SpawnGroup::new(Species::Fish, 3),
            SpawnGroup::new(Species::Turtle, 2),
        ];
        Self {
            seed: None,
            initial_animals,
            spawn_radius: 25.0,
            spawn_height: 10.0,
            roam_bound: 50.0,
            max_altitude: 20.0,
            max_population: 2000,
            lake_extent: 10,
            lake_radius: 8.0,
            lake_depth: 4,
        }
    }
}

/// Voxel terrain generation and maintenance.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u64,
    pub world_height: i32,
    /// Chunks covering `[-initial_extent, initial_extent]` on both axes are
    /// generated up front.
    pub initial_extent: i32,
    pub tree_chance: f64,
    pub maintenance_sample: usize,
    pub regrowth_chance: f64,
    pub nearby_scan_cap: usize,
    pub render_distance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_height: 16,
            initial_extent: 32,
            tree_chance: 0.08,
            maintenance_sample: 30,
            regrowth_chance: 0.05,
            nearby_scan_cap: 100,
            render_distance: 80.0,
        }
    }
}

/// Energy bookkeeping for every animal.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    /// Fraction of current energy lost per tick while starving.
    pub starvation_damage: f64,
    pub critical_hunger: f64,
    /// Per-tick energy cost, multiplied by speed.
    pub move_cost: f64,
    pub food_energy: f64,
    pub eat_range: f64,
    pub max_age: u32,
    pub offspring_energy_fraction: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            starvation_damage: 0.1,
            critical_hunger: 0.2,
            move_cost: 0.2,
            food_energy: 25.0,
            eat_range: 2.0,
            max_age: 3000,
            offspring_energy_fraction: 0.7,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BreedingConfig {
    /// Multiple of max energy an animal must exceed to breed.
    pub energy_threshold: f64,
    /// Multiple of max energy paid per offspring.
    pub energy_cost: f64,
    pub age_min: u32,
    pub cooldown: u32,
    pub offspring_offset: f64,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 1.2,
            energy_cost: 0.4,
            age_min: 120,
            cooldown: 200,
            offspring_offset: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GeneticsConfig {
    pub variation: f64,
    pub color_mutation_chance: f64,
    pub color_jitter: i32,
    /// Offspring genetics are derived from the parent a second time after
    /// construction, compounding the variance.
    pub double_mutation: bool,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            variation: 0.2,
            color_mutation_chance: 0.1,
            color_jitter: 20,
            double_mutation: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DiseaseConfig {
    pub spread_radius: f64,
    pub infection_chance: f64,
    pub death_chance: f64,
    pub recovery_time: i64,
    pub energy_drain: f64,
    pub severity_min: f64,
    pub severity_max: f64,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            spread_radius: 15.0,
            infection_chance: 0.05,
            death_chance: 0.02,
            recovery_time: 500,
            energy_drain: 0.01,
            severity_min: 0.5,
            severity_max: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WeatherConfig {
    pub day_length: u64,
    pub season_length: u64,
    pub weather_duration: u64,
    pub change_chance: f64,
    pub night_brightness: f64,
    pub day_brightness: f64,
    pub base_temperature: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            day_length: 2000,
            season_length: 4000,
            weather_duration: 300,
            change_chance: 0.01,
            night_brightness: 0.3,
            day_brightness: 1.0,
            base_temperature: 20.0,
        }
    }
}

/// Phase intervals of the periodic sub-updates, all gated on the same
/// frame counter.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    pub maintenance_interval: u64,
    pub plant_growth_interval: u64,
    pub chunk_expansion_interval: u64,
    pub plant_growth_samples: usize,
    pub plant_growth_chance: f64,
    pub plant_growth_extent: i32,
    pub ticks_per_second: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            maintenance_interval: 60,
            plant_growth_interval: 10,
            chunk_expansion_interval: 30,
            plant_growth_samples: 5,
            plant_growth_chance: 0.05,
            plant_growth_extent: 32,
            ticks_per_second: 60,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub metabolism: MetabolismConfig,
    pub breeding: BreedingConfig,
    pub genetics: GeneticsConfig,
    pub disease: DiseaseConfig,
    pub weather: WeatherConfig,
    pub schedule: ScheduleConfig,
    pub target_fps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            terrain: TerrainConfig::default(),
            metabolism: MetabolismConfig::default(),
            breeding: BreedingConfig::default(),
            genetics: GeneticsConfig::default(),
            disease: DiseaseConfig::default(),
            weather: WeatherConfig::default(),
            schedule: ScheduleConfig::default(),
            target_fps: 60,
        }
    }
}

fn probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.spawn_radius > 0.0, "Spawn radius must be positive");
        anyhow::ensure!(self.world.roam_bound > 0.0, "Roam bound must be positive");
        anyhow::ensure!(
            self.world.max_altitude.is_finite() && self.world.max_altitude >= 0.0,
            "Max altitude must be finite and non-negative"
        );
        anyhow::ensure!(
            self.world.max_population > 0 && self.world.max_population <= 100_000,
            "Max population must be in [1, 100000]"
        );
        let initial = self.initial_population();
        anyhow::ensure!(
            initial <= self.world.max_population,
            "Initial population {} exceeds max population {}",
            initial,
            self.world.max_population
        );

        // Terrain validation
        anyhow::ensure!(
            self.terrain.world_height >= 13 && self.terrain.world_height <= 256,
            "World height must be in [13, 256]"
        );
        anyhow::ensure!(
            self.terrain.initial_extent >= 0,
            "Initial extent must be non-negative"
        );
        anyhow::ensure!(probability(self.terrain.tree_chance), "Tree chance must be in [0.0, 1.0]");
        anyhow::ensure!(
            probability(self.terrain.regrowth_chance),
            "Regrowth chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.terrain.nearby_scan_cap > 0,
            "Nearby scan cap must be positive"
        );

        // Metabolism validation
        anyhow::ensure!(
            probability(self.metabolism.starvation_damage),
            "Starvation damage must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            probability(self.metabolism.critical_hunger),
            "Critical hunger must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.metabolism.move_cost >= 0.0, "Move cost must be non-negative");
        anyhow::ensure!(self.metabolism.food_energy > 0.0, "Food energy must be positive");
        anyhow::ensure!(self.metabolism.eat_range > 0.0, "Eat range must be positive");
        anyhow::ensure!(self.metabolism.max_age > 0, "Max age must be positive");

        // Breeding validation
        anyhow::ensure!(
            self.breeding.energy_cost >= 0.0,
            "Breeding energy cost must be non-negative"
        );
        anyhow::ensure!(
            self.breeding.energy_threshold > 0.0,
            "Breeding energy threshold must be positive"
        );
        anyhow::ensure!(
            self.breeding.offspring_offset >= 0.0,
            "Offspring offset must be non-negative"
        );

        // Genetics validation
        anyhow::ensure!(
            self.genetics.variation >= 0.0 && self.genetics.variation < 1.0,
            "Genetic variation must be in [0.0, 1.0)"
        );
        anyhow::ensure!(
            probability(self.genetics.color_mutation_chance),
            "Color mutation chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.genetics.color_jitter >= 0, "Color jitter must be non-negative");

        // Disease validation
        anyhow::ensure!(
            probability(self.disease.infection_chance),
            "Infection chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(probability(self.disease.death_chance), "Death chance must be in [0.0, 1.0]");
        anyhow::ensure!(self.disease.recovery_time > 0, "Recovery time must be positive");
        anyhow::ensure!(
            self.disease.severity_min > 0.0 && self.disease.severity_min < self.disease.severity_max,
            "Severity range must be non-empty and positive"
        );

        // Weather validation
        anyhow::ensure!(self.weather.day_length > 0, "Day length must be positive");
        anyhow::ensure!(self.weather.season_length > 0, "Season length must be positive");
        anyhow::ensure!(
            probability(self.weather.change_chance),
            "Weather change chance must be in [0.0, 1.0]"
        );

        // Schedule validation
        anyhow::ensure!(
            self.schedule.maintenance_interval > 0
                && self.schedule.plant_growth_interval > 0
                && self.schedule.chunk_expansion_interval > 0,
            "Schedule intervals must be positive"
        );
        anyhow::ensure!(self.schedule.ticks_per_second > 0, "Ticks per second must be positive");
        anyhow::ensure!(
            self.schedule.plant_growth_extent >= 0,
            "Plant growth extent must be non-negative"
        );
        anyhow::ensure!(
            self.target_fps > 0 && self.target_fps <= 1000,
            "Target FPS must be in [1, 1000]"
        );

        Ok(())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::from(e).with_context(format!("reading {}", path.display())))?;
        let config: AppConfig = toml::from_str(&content)?;
        config
            .validate()
            .map_err(|e| SimError::validation(e.to_string()))?;
        Ok(config)
    }

    /// Writes this config as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| SimError::serialization(e.to_string()))?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Stable hash of every parameter that influences simulation outcome.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.terrain).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.breeding).as_bytes());
        hasher.update(format!("{:?}", self.genetics).as_bytes());
        hasher.update(format!("{:?}", self.disease).as_bytes());
        hasher.update(format!("{:?}", self.weather).as_bytes());
        hasher.update(format!("{:?}", self.schedule).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Total number of founders spawned at world creation.
    #[must_use]
    pub fn initial_population(&self) -> usize {
        self.world.initial_animals.iter().map(|g| g.count).sum()
    }
}
