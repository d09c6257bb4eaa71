//! Core data structures for the Terrarium simulation.

pub mod entity;
pub mod environment;
pub mod genotype;
pub mod species;
pub mod terrain;
pub mod vector;
