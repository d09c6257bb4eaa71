use super::Planet;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrarium_data::{BlockKind, BlockPos, ChunkCoord, CHUNK_SIZE};

const OCTAVES: usize = 3;
const BASE_FREQUENCY: f64 = 0.05;
const MIN_TREE_GROUND: i32 = 3;

/// Terrain height of a column. Pure in `(x, z)`: three octaves of
/// `sin * cos`, mapped into roughly `[3.3, 12.7]` and capped below the world ceiling.
#[must_use]
pub fn height_at(x: i32, z: i32, world_height: i32) -> f64 {
    let mut height = 0.0;
    let mut scale = 1.0;
    let mut amplitude = 1.0;
    for _ in 0..OCTAVES {
        let frequency = scale * BASE_FREQUENCY;
        height += (f64::from(x) * frequency).sin() * (f64::from(z) * frequency).cos() * amplitude;
        scale *= 2.0;
        amplitude *= 0.5;
    }
    let height = 4.0 + (height + 1.5) / 3.0 * 8.0;
    height.min(f64::from(world_height - 1))
}

/// Material of a voxel given its column height.
#[must_use]
pub fn block_kind_at(y: i32, height: f64) -> BlockKind {
    if f64::from(y) > height {
        return BlockKind::Air;
    }
    if y < 0 {
        return BlockKind::Stone;
    }
    let surface_y = height as i32;
    let sandy = surface_y < 4;
    if y == surface_y {
        if sandy {
            BlockKind::Sand
        } else {
            BlockKind::Grass
        }
    } else if y > surface_y - 3 {
        if sandy {
            BlockKind::Sand
        } else {
            BlockKind::Dirt
        }
    } else {
        BlockKind::Stone
    }
}

fn chunk_seed(seed: u64, chunk: ChunkCoord) -> u64 {
    let x = u64::from(chunk.x as u32);
    let z = u64::from(chunk.z as u32);
    seed ^ x.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ z.wrapping_mul(0xC2B2_AE3D_27D4_EB4F).rotate_left(31)
}

impl Planet {
    /// Materializes one chunk. Idempotent: a generated chunk is never touched
    /// again by generation.
    pub fn generate_chunk(&mut self, chunk: ChunkCoord) {
        if !self.generated_chunks.insert(chunk) {
            return;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(chunk_seed(self.seed, chunk));

        for x in chunk.origin_x()..chunk.origin_x() + CHUNK_SIZE {
            for z in chunk.origin_z()..chunk.origin_z() + CHUNK_SIZE {
                let height = self.height_at(x, z);
                let surface_y = height as i32;
                for y in 0..=surface_y {
                    let kind = block_kind_at(y, height);
                    if kind != BlockKind::Air {
                        self.place(BlockPos::new(x, y, z), kind, y == surface_y);
                    }
                }

                if surface_y > MIN_TREE_GROUND && rng.gen::<f64>() < self.tree_chance {
                    self.place_tree(BlockPos::new(x, surface_y + 1, z), &mut rng);
                }
            }
        }
        tracing::trace!(chunk_x = chunk.x, chunk_z = chunk.z, "Generated chunk");
    }

    /// Plants a 3-5 block trunk with a 5x5 canopy over its top three layers.
    /// Leaves never overwrite an occupied coordinate.
    pub fn place_tree<R: Rng>(&mut self, base: BlockPos, rng: &mut R) {
        let trunk = rng.gen_range(3..=5);
        for i in 0..trunk {
            self.place(BlockPos::new(base.x, base.y + i, base.z), BlockKind::Wood, true);
        }
        for dx in -2..=2 {
            for dz in -2..=2 {
                for dy in trunk - 2..=trunk {
                    let pos = BlockPos::new(base.x + dx, base.y + dy, base.z + dz);
                    if !self.is_occupied(&pos) {
                        self.place(pos, BlockKind::Leaves, true);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use proptest::prelude::*;

    #[test]
    fn test_height_range() {
        for x in -100..100 {
            for z in (-100..100).step_by(7) {
                let h = height_at(x, z, 16);
                assert!((3.3..=12.7).contains(&h), "height {h} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_height_at_origin() {
        assert!((height_at(0, 0, 16) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_block_kind_rules() {
        assert_eq!(block_kind_at(9, 8.5), BlockKind::Air);
        assert_eq!(block_kind_at(8, 8.5), BlockKind::Grass);
        assert_eq!(block_kind_at(6, 8.5), BlockKind::Dirt);
        assert_eq!(block_kind_at(5, 8.5), BlockKind::Stone);
        assert_eq!(block_kind_at(3, 3.9), BlockKind::Sand);
        assert_eq!(block_kind_at(1, 3.9), BlockKind::Sand);
        assert_eq!(block_kind_at(0, 3.9), BlockKind::Stone);
        assert_eq!(block_kind_at(-1, 3.9), BlockKind::Stone);
    }

    #[test]
    fn test_chunk_generation_is_idempotent() {
        let mut planet = Planet::empty(&TerrainConfig::default());
        planet.generate_chunk(ChunkCoord::new(1, -1));
        let blocks = planet.block_count();
        let surface = planet.surface_count();
        planet.generate_chunk(ChunkCoord::new(1, -1));
        assert_eq!(planet.block_count(), blocks);
        assert_eq!(planet.surface_count(), surface);
        assert_eq!(planet.chunk_count(), 1);
    }

    #[test]
    fn test_generation_order_independent() {
        let config = TerrainConfig::default();
        let mut a = Planet::empty(&config);
        a.generate_chunk(ChunkCoord::new(0, 0));
        a.generate_chunk(ChunkCoord::new(3, 3));
        let mut b = Planet::empty(&config);
        b.generate_chunk(ChunkCoord::new(3, 3));
        b.generate_chunk(ChunkCoord::new(0, 0));
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..16 {
                    let pos = BlockPos::new(x, y, z);
                    assert_eq!(a.peek(pos), b.peek(pos));
                }
            }
        }
    }

    #[test]
    fn test_tree_shape() {
        let mut planet = Planet::empty(&TerrainConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let base = BlockPos::new(100, 9, 100);
        planet.place(BlockPos::new(101, 11, 100), BlockKind::Stone, false);
        planet.place_tree(base, &mut rng);
        assert_eq!(planet.peek(base), BlockKind::Wood);
        assert_eq!(planet.peek(BlockPos::new(100, 11, 100)), BlockKind::Wood);
        assert_eq!(planet.peek(BlockPos::new(98, 12, 102)), BlockKind::Leaves);
        assert_eq!(planet.peek(BlockPos::new(101, 11, 100)), BlockKind::Stone);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]
        #[test]
        fn prop_height_is_pure(x in -10_000i32..10_000, z in -10_000i32..10_000) {
            let a = height_at(x, z, 16);
            let b = height_at(x, z, 16);
            prop_assert_eq!(a.to_bits(), b.to_bits());
            prop_assert!(a <= 15.0);
        }
    }
}
