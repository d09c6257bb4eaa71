//! # Terrarium Core
//!
//! The deterministic simulation engine behind Terrarium, a voxel-terrain
//! wildlife ecosystem.
//!
//! This crate contains:
//! - The voxel planet with lazy chunk generation
//! - Genetics inheritance and animal lifecycle
//! - Per-tick animal behavior (foraging, hunting, breeding)
//! - Disease outbreaks and contagion
//! - Weather, seasons and the day-night cycle
//! - Predator packs
//! - Configuration, errors, metrics and structured logging
//!
//! All randomness flows through a caller-supplied RNG, so a seeded
//! `ChaCha8Rng` reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use terrarium_core::config::TerrainConfig;
//! use terrarium_core::planet::Planet;
//! use terrarium_data::BlockKind;
//!
//! let mut planet = Planet::new(&TerrainConfig::default());
//! assert_eq!(planet.block_at(0, -1, 0), BlockKind::Air);
//! assert!(planet.block_count() > 0);
//! ```

/// Per-tick animal behavior
pub mod animal;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for fallible operations
pub mod error;
/// Trait inheritance and mutation
pub mod genetics;
/// Disease outbreaks, spread and recovery
pub mod health;
/// Animal creation (founders and offspring)
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Predator packs and territorial behavior
pub mod pack;
/// Voxel terrain store and generation
pub mod planet;
/// Day-night cycle, seasons and weather
pub mod weather;

pub use genetics::GeneticsLogic;
pub use metrics::{init_logging, Metrics};
