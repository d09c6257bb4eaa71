mod common;

use common::{AnimalBuilder, EcosystemBuilder};
use terrarium_lib::model::state::{BlockKind, BlockPos, ChunkCoord, Species, Vec3};

#[test]
fn test_initial_terrain_and_lake() {
    let eco = EcosystemBuilder::new().build();
    // Default extent of 32 covers chunks -2..=2 on both axes.
    assert_eq!(eco.planet.chunk_count(), 25);
    assert!(eco.planet.is_chunk_generated(ChunkCoord::new(-2, 2)));
    assert!(!eco.planet.is_chunk_generated(ChunkCoord::new(3, 0)));

    for y in 0..4 {
        assert_eq!(eco.planet.peek(BlockPos::new(0, y, 0)), BlockKind::Water);
    }
    assert_ne!(eco.planet.peek(BlockPos::new(9, 0, 0)), BlockKind::Water);
}

#[test]
fn test_lookup_generates_missing_chunk() {
    let mut eco = EcosystemBuilder::new().build();
    let far = ChunkCoord::from_block(200, 200);
    assert!(!eco.planet.is_chunk_generated(far));
    let before = eco.planet.block_count();

    assert_ne!(eco.planet.block_at(200, 0, 200), BlockKind::Air);

    assert!(eco.planet.is_chunk_generated(far));
    assert!(eco.planet.block_count() > before);
    assert_eq!(eco.planet.block_at(200, -1, 200), BlockKind::Air);
    assert_eq!(eco.planet.block_at(200, 16, 200), BlockKind::Air);
}

#[test]
fn test_wandering_animal_pulls_in_terrain() {
    let mut eco = EcosystemBuilder::new()
        .without_disease()
        .with_animal(AnimalBuilder::new(Species::Wolf).at(100.5, -100.5))
        .build();
    let chunk = ChunkCoord::from_block(100, -101);
    assert!(!eco.planet.is_chunk_generated(chunk));

    eco.update();

    assert!(eco.planet.is_chunk_generated(chunk));
}

#[test]
fn test_written_blocks_become_surface() {
    let mut eco = EcosystemBuilder::new()
        .with_block(5, 15, 5, BlockKind::Wood)
        .build();
    let pos = BlockPos::new(5, 15, 5);
    assert_eq!(eco.planet.peek(pos), BlockKind::Wood);
    assert!(eco.planet.is_surface(&pos));

    let surface = eco.planet.surface_count();
    eco.planet.set_block_at(5, 99, 5, BlockKind::Wood);
    assert_eq!(eco.planet.surface_count(), surface);
}

#[test]
fn test_surface_view_within_render_distance() {
    let eco = EcosystemBuilder::new().build();
    let camera = Vec3::new(0.0, 20.0, 0.0);
    let view = eco.surface_view(camera);
    assert!(!view.is_empty());
    for block in &view {
        assert!(block.pos.to_vec3().distance_to(camera) <= eco.config.terrain.render_distance);
    }
}

#[test]
fn test_grazed_terrain_recovers_over_time() {
    let mut eco = EcosystemBuilder::new()
        .with_config(|c| {
            c.terrain.maintenance_sample = 100_000;
            c.terrain.regrowth_chance = 1.0;
            c.schedule.maintenance_interval = 1;
        })
        .build();
    let x = 20;
    let z = 20;
    let top = eco.planet.height_at(x, z) as i32;
    eco.planet.set_block_at(x, top, z, BlockKind::Dirt);

    eco.update();

    assert_eq!(eco.planet.peek(BlockPos::new(x, top, z)), BlockKind::Grass);
}
