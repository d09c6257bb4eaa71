use serde::{Deserialize, Serialize};

/// Width and depth of a terrain generation chunk, in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Material of a single voxel. `Air` doubles as "nothing stored here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Sand,
    Water,
    Wood,
    Leaves,
}

impl BlockKind {
    /// Display color used by renderers.
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            BlockKind::Air => (10, 10, 30),
            BlockKind::Grass => (34, 139, 34),
            BlockKind::Dirt => (139, 69, 19),
            BlockKind::Stone => (128, 128, 128),
            BlockKind::Sand => (194, 178, 128),
            BlockKind::Water => (0, 119, 182),
            BlockKind::Wood => (101, 67, 33),
            BlockKind::Leaves => (0, 100, 0),
        }
    }

    /// Whether herbivores graze on this block.
    #[must_use]
    pub fn is_edible(&self) -> bool {
        matches!(self, BlockKind::Grass | BlockKind::Leaves)
    }

    /// What an edible block turns into once grazed.
    #[must_use]
    pub fn grazed(&self) -> BlockKind {
        match self {
            BlockKind::Grass => BlockKind::Dirt,
            BlockKind::Leaves => BlockKind::Air,
            other => *other,
        }
    }
}

/// Integer voxel coordinate. Identity key into the block map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn chunk(&self) -> ChunkCoord {
        ChunkCoord::from_block(self.x, self.z)
    }

    #[must_use]
    pub fn to_vec3(&self) -> super::vector::Vec3 {
        super::vector::Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

/// Chunk index on the XZ plane (in chunks, not blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk owning the block column `(block_x, block_z)`.
    #[must_use]
    pub const fn from_block(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x.div_euclid(CHUNK_SIZE),
            z: block_z.div_euclid(CHUNK_SIZE),
        }
    }

    /// World X of the chunk's corner.
    #[must_use]
    pub const fn origin_x(self) -> i32 {
        self.x * CHUNK_SIZE
    }

    /// World Z of the chunk's corner.
    #[must_use]
    pub const fn origin_z(self) -> i32 {
        self.z * CHUNK_SIZE
    }
}

/// A renderable block handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceBlock {
    pub pos: BlockPos,
    pub kind: BlockKind,
}
