//! Core data structures for the Terrarium simulation.
//!
//! Everything in this crate is plain data: the logic that mutates it lives in
//! `terrarium_core`.

pub mod data;

pub use data::entity::{Animal, AnimalId, AnimalView, Infection};
pub use data::environment::{PopulationStats, Season, WeatherKind, WeatherReport};
pub use data::genotype::Genetics;
pub use data::species::{Species, SpeciesProfile};
pub use data::terrain::{BlockKind, BlockPos, ChunkCoord, SurfaceBlock, CHUNK_SIZE};
pub use data::vector::{rotate_x, rotate_y, rotate_z, Vec3};
