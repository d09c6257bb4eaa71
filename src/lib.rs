//! Terrarium: a voxel-terrain wildlife ecosystem.
//!
//! [`model::ecosystem::Ecosystem`] owns the world and advances it one tick at
//! a time; [`app::App`] wraps it with pause, reset, outbreak controls and a
//! paced run loop.

pub mod app;
pub mod model;
