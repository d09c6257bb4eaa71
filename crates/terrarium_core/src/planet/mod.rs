//! Sparse voxel terrain with lazy chunk materialization.
//!
//! The block map keeps first-insertion order: the bounded scans used by
//! pathfinding and maintenance look at the oldest entries, so iteration order
//! is part of the observable behavior.

use crate::config::{AppConfig, TerrainConfig};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use terrarium_data::{BlockKind, BlockPos, ChunkCoord, SurfaceBlock, Vec3};

pub mod generation;

pub use generation::{block_kind_at, height_at};

/// Every block the planet knows about, in the order it was first written.
#[derive(Debug, Clone, Default)]
struct BlockMap {
    kinds: HashMap<BlockPos, BlockKind>,
    order: Vec<BlockPos>,
}

impl BlockMap {
    fn get(&self, pos: &BlockPos) -> Option<BlockKind> {
        self.kinds.get(pos).copied()
    }

    fn contains(&self, pos: &BlockPos) -> bool {
        self.kinds.contains_key(pos)
    }

    fn insert(&mut self, pos: BlockPos, kind: BlockKind) {
        if self.kinds.insert(pos, kind).is_none() {
            self.order.push(pos);
        }
    }

    fn iter(&self) -> impl Iterator<Item = (BlockPos, BlockKind)> + '_ {
        self.order
            .iter()
            .map(move |pos| (*pos, self.kinds.get(pos).copied().unwrap_or_default()))
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Insertion-ordered set of render candidates. Never pruned.
#[derive(Debug, Clone, Default)]
struct SurfaceSet {
    members: HashSet<BlockPos>,
    order: Vec<BlockPos>,
}

impl SurfaceSet {
    fn insert(&mut self, pos: BlockPos) {
        if self.members.insert(pos) {
            self.order.push(pos);
        }
    }

    fn contains(&self, pos: &BlockPos) -> bool {
        self.members.contains(pos)
    }

    fn iter(&self) -> impl Iterator<Item = &BlockPos> + '_ {
        self.order.iter()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// The voxel world: a sparse block map, a monotonic surface index and the set
/// of chunks that have already been generated.
#[derive(Debug, Clone)]
pub struct Planet {
    blocks: BlockMap,
    surface: SurfaceSet,
    generated_chunks: HashSet<ChunkCoord>,
    seed: u64,
    world_height: i32,
    tree_chance: f64,
    maintenance_sample: usize,
    regrowth_chance: f64,
    nearby_scan_cap: usize,
}

impl Planet {
    /// Builds a planet and materializes the initial terrain around the origin.
    #[must_use]
    pub fn new(config: &TerrainConfig) -> Self {
        let mut planet = Self::empty(config);
        planet.generate_initial_terrain(config.initial_extent);
        planet
    }

    /// A planet with no generated chunks. Reads still generate lazily.
    #[must_use]
    pub fn empty(config: &TerrainConfig) -> Self {
        Self {
            blocks: BlockMap::default(),
            surface: SurfaceSet::default(),
            generated_chunks: HashSet::new(),
            seed: config.seed,
            world_height: config.world_height,
            tree_chance: config.tree_chance,
            maintenance_sample: config.maintenance_sample,
            regrowth_chance: config.regrowth_chance,
            nearby_scan_cap: config.nearby_scan_cap,
        }
    }

    /// Builds the planet for a full ecosystem, including the central lake.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let mut planet = Self::new(&config.terrain);
        planet.add_lake(
            config.world.lake_extent,
            config.world.lake_radius,
            config.world.lake_depth,
        );
        planet
    }

    /// Generates every chunk whose corner lies in `[-extent, extent]` on
    /// both horizontal axes.
    pub fn generate_initial_terrain(&mut self, extent: i32) {
        let step = terrarium_data::CHUNK_SIZE as usize;
        for x in (-extent..=extent).step_by(step) {
            for z in (-extent..=extent).step_by(step) {
                self.generate_chunk(ChunkCoord::from_block(x, z));
            }
        }
    }

    #[must_use]
    pub fn height_at(&self, x: i32, z: i32) -> f64 {
        height_at(x, z, self.world_height)
    }

    /// Stored kind at a coordinate, generating its chunk on first touch.
    /// Anything outside the vertical bounds is Air.
    pub fn block_at(&mut self, x: i32, y: i32, z: i32) -> BlockKind {
        if y < 0 || y >= self.world_height {
            return BlockKind::Air;
        }
        self.generate_chunk(ChunkCoord::from_block(x, z));
        self.blocks
            .get(&BlockPos::new(x, y, z))
            .unwrap_or(BlockKind::Air)
    }

    /// Stored kind without triggering generation.
    #[must_use]
    pub fn peek(&self, pos: BlockPos) -> BlockKind {
        self.blocks.get(&pos).unwrap_or(BlockKind::Air)
    }

    /// Writes a block directly. Writes outside the vertical bounds are ignored.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, kind: BlockKind) {
        if y < 0 || y >= self.world_height {
            return;
        }
        let pos = BlockPos::new(x, y, z);
        self.blocks.insert(pos, kind);
        if kind != BlockKind::Air {
            self.surface.insert(pos);
        }
    }

    /// Writes a block as part of world setup, bypassing the height bounds.
    pub(crate) fn place(&mut self, pos: BlockPos, kind: BlockKind, surface: bool) {
        self.blocks.insert(pos, kind);
        if surface {
            self.surface.insert(pos);
        }
    }

    pub(crate) fn is_occupied(&self, pos: &BlockPos) -> bool {
        self.blocks.contains(pos)
    }

    /// Floods a disc of water around the origin.
    pub fn add_lake(&mut self, extent: i32, radius: f64, depth: i32) {
        for x in -extent..=extent {
            for z in -extent..=extent {
                let dist = f64::from(x * x + z * z).sqrt();
                if dist < radius {
                    for y in 0..depth {
                        self.place(BlockPos::new(x, y, z), BlockKind::Water, true);
                    }
                }
            }
        }
    }

    /// Periodic regrowth: looks only at the oldest `maintenance_sample`
    /// entries and turns exposed dirt back into grass.
    pub fn maintenance<R: Rng>(&mut self, rng: &mut R) -> usize {
        let mut regrown = Vec::new();
        for (pos, kind) in self.blocks.iter().take(self.maintenance_sample) {
            if kind == BlockKind::Dirt
                && rng.gen::<f64>() < self.regrowth_chance
                && pos.y == self.height_at(pos.x, pos.z) as i32
            {
                regrown.push(pos);
            }
        }
        for pos in &regrown {
            self.blocks.insert(*pos, BlockKind::Grass);
        }
        regrown.len()
    }

    /// Blocks strictly within `radius` of `position`, drawn from the first
    /// `nearby_scan_cap` map entries only.
    // TODO: replace the capped scan with a per-chunk spatial index once
    // pathfinding no longer needs to match the capped results.
    #[must_use]
    pub fn nearby_blocks(&self, position: Vec3, radius: f64) -> Vec<(BlockPos, BlockKind)> {
        self.blocks
            .iter()
            .take(self.nearby_scan_cap)
            .filter(|(pos, _)| pos.to_vec3().distance_to(position) < radius)
            .collect()
    }

    /// Surface blocks strictly within `render_distance` of the camera.
    #[must_use]
    pub fn visible_blocks(&self, camera: Vec3, render_distance: f64) -> Vec<SurfaceBlock> {
        self.surface
            .iter()
            .filter(|pos| pos.to_vec3().distance_to(camera) < render_distance)
            .map(|pos| SurfaceBlock {
                pos: *pos,
                kind: self.peek(*pos),
            })
            .collect()
    }

    #[must_use]
    pub fn is_surface(&self, pos: &BlockPos) -> bool {
        self.surface.contains(pos)
    }

    #[must_use]
    pub fn is_chunk_generated(&self, chunk: ChunkCoord) -> bool {
        self.generated_chunks.contains(&chunk)
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surface.len()
    }

    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.generated_chunks.len()
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn world_height(&self) -> i32 {
        self.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_config() -> TerrainConfig {
        TerrainConfig {
            tree_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_terrain_covers_origin() {
        let planet = Planet::new(&TerrainConfig::default());
        assert_eq!(planet.chunk_count(), 25);
        assert!(planet.is_chunk_generated(ChunkCoord::new(0, 0)));
        assert!(planet.is_chunk_generated(ChunkCoord::new(-2, -2)));
        assert!(planet.is_chunk_generated(ChunkCoord::new(2, 2)));
    }

    #[test]
    fn test_out_of_bounds_is_air() {
        let mut planet = Planet::empty(&flat_config());
        assert_eq!(planet.block_at(0, -1, 0), BlockKind::Air);
        assert_eq!(planet.block_at(0, 16, 0), BlockKind::Air);
        assert_eq!(planet.chunk_count(), 0);
    }

    #[test]
    fn test_lazy_generation_on_read() {
        let mut planet = Planet::empty(&flat_config());
        let kind = planet.block_at(200, 0, 200);
        assert!(planet.is_chunk_generated(ChunkCoord::from_block(200, 200)));
        assert_ne!(kind, BlockKind::Air);
    }

    #[test]
    fn test_set_block_ignores_out_of_range() {
        let mut planet = Planet::empty(&flat_config());
        planet.set_block_at(0, 16, 0, BlockKind::Stone);
        planet.set_block_at(0, -1, 0, BlockKind::Stone);
        assert_eq!(planet.block_count(), 0);
    }

    #[test]
    fn test_surface_never_shrinks() {
        let mut planet = Planet::empty(&flat_config());
        planet.set_block_at(1, 5, 1, BlockKind::Leaves);
        assert!(planet.is_surface(&BlockPos::new(1, 5, 1)));
        planet.set_block_at(1, 5, 1, BlockKind::Air);
        assert!(planet.is_surface(&BlockPos::new(1, 5, 1)));
        assert_eq!(planet.peek(BlockPos::new(1, 5, 1)), BlockKind::Air);
    }

    #[test]
    fn test_nearby_scan_is_capped() {
        let config = TerrainConfig {
            nearby_scan_cap: 3,
            ..flat_config()
        };
        let mut planet = Planet::empty(&config);
        for x in 0..10 {
            planet.set_block_at(x, 1, 0, BlockKind::Grass);
        }
        let nearby = planet.nearby_blocks(Vec3::new(5.0, 1.0, 0.0), 100.0);
        assert_eq!(nearby.len(), 3);
        assert_eq!(nearby[0].0, BlockPos::new(0, 1, 0));
    }

    #[test]
    fn test_nearby_radius_is_strict() {
        let mut planet = Planet::empty(&flat_config());
        planet.set_block_at(2, 1, 0, BlockKind::Grass);
        assert!(planet.nearby_blocks(Vec3::new(0.0, 1.0, 0.0), 2.0).is_empty());
        assert_eq!(planet.nearby_blocks(Vec3::new(0.0, 1.0, 0.0), 2.1).len(), 1);
    }

    #[test]
    fn test_lake_is_water_and_surface() {
        let mut planet = Planet::empty(&flat_config());
        planet.add_lake(10, 8.0, 4);
        assert_eq!(planet.peek(BlockPos::new(0, 0, 0)), BlockKind::Water);
        assert_eq!(planet.peek(BlockPos::new(7, 3, 0)), BlockKind::Water);
        assert_eq!(planet.peek(BlockPos::new(8, 0, 0)), BlockKind::Air);
        assert!(planet.is_surface(&BlockPos::new(0, 3, 0)));
    }

    #[test]
    fn test_maintenance_regrows_exposed_dirt() {
        let config = TerrainConfig {
            regrowth_chance: 1.0,
            ..flat_config()
        };
        let mut planet = Planet::empty(&config);
        let top = planet.height_at(3, 3) as i32;
        planet.set_block_at(3, top, 3, BlockKind::Dirt);
        planet.set_block_at(3, top - 1, 3, BlockKind::Dirt);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(planet.maintenance(&mut rng), 1);
        assert_eq!(planet.peek(BlockPos::new(3, top, 3)), BlockKind::Grass);
        assert_eq!(planet.peek(BlockPos::new(3, top - 1, 3)), BlockKind::Dirt);
    }

    #[test]
    fn test_visible_blocks_filters_by_distance() {
        let mut planet = Planet::empty(&flat_config());
        planet.set_block_at(0, 1, 0, BlockKind::Grass);
        planet.set_block_at(90, 1, 0, BlockKind::Grass);
        let visible = planet.visible_blocks(Vec3::new(0.0, 1.0, 0.0), 80.0);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, BlockKind::Grass);
    }
}
