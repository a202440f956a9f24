use strata_blocks::{BlockRegistry, EMPTY};
use strata_world::{
    ConfigError, ConstantNoise, GenerationError, NoiseProvider, SimplexNoise,
    TerrainGenerator, TerrainParams, WorldSize,
};

fn flat_terrain() -> TerrainParams {
    TerrainParams {
        scale: 30.0,
        magnitude: 0.0,
        offset: 0.5,
        ..TerrainParams::default()
    }
}

/// Stone everywhere, coal only in the x == 0 slab, iron nowhere.
struct SlabNoise;

impl NoiseProvider for SlabNoise {
    fn noise_2d(&self, _seed: &str, _x: f32, _y: f32) -> f32 {
        0.0
    }

    fn noise_3d(&self, seed: &str, x: f32, _y: f32, _z: f32) -> f32 {
        match seed {
            "stone" => 1.0,
            "coalOre" if x == 0.0 => 1.0,
            _ => -1.0,
        }
    }
}

#[test]
fn flat_world_without_resources() {
    let reg = BlockRegistry::builtin().without_resources();
    let noise = ConstantNoise(0.0);
    let (grid, stats) = TerrainGenerator::new(&reg, &noise)
        .generate(&WorldSize::new(4, 4, None), &flat_terrain())
        .unwrap();

    let grass = reg.id_by_name("grass").unwrap();
    let dirt = reg.id_by_name("dirt").unwrap();
    for x in 0..4 {
        for z in 0..4 {
            assert_eq!(grid.id_at(x, 0, z), dirt);
            assert_eq!(grid.id_at(x, 1, z), dirt);
            assert_eq!(grid.id_at(x, 2, z), grass);
            assert_eq!(grid.id_at(x, 3, z), EMPTY);
        }
    }
    assert_eq!(grid.count_id(grass), 16);
    assert_eq!(grid.count_id(dirt), 32);
    assert_eq!(stats.columns, 16);
    assert_eq!(stats.surface_min, Some(2));
    assert_eq!(stats.surface_max, Some(2));
    assert!(stats.resource_cells.is_empty());
}

#[test]
fn resources_survive_below_surface_and_later_types_win() {
    let reg = BlockRegistry::builtin();
    let (grid, stats) = TerrainGenerator::new(&reg, &SlabNoise)
        .generate(&WorldSize::new(4, 4, None), &flat_terrain())
        .unwrap();

    let stone = reg.id_by_name("stone").unwrap();
    let coal = reg.id_by_name("coalOre").unwrap();
    for z in 0..4 {
        for y in 0..=2 {
            assert_eq!(grid.id_at(0, y, z), coal);
            for x in 1..4 {
                assert_eq!(grid.id_at(x, y, z), stone);
            }
        }
        for x in 0..4 {
            assert_eq!(grid.id_at(x, 3, z), EMPTY);
        }
    }
    assert_eq!(grid.count_id(reg.id_by_name("grass").unwrap()), 0);
    assert_eq!(grid.count_id(reg.id_by_name("dirt").unwrap()), 0);
    assert_eq!(stats.resource_cells, vec![(3, 64), (4, 16), (5, 0)]);
    assert_eq!(stats.cleared_cells, 16);
}

#[test]
fn scarcity_threshold_is_strict() {
    let reg = BlockRegistry::builtin();
    let mut terrain = TerrainParams::default();
    terrain.enable = false;
    let size = WorldSize::new(3, 3, None);

    let (grid, _) = TerrainGenerator::new(&reg, &ConstantNoise(0.5))
        .generate(&size, &terrain)
        .unwrap();
    assert!(grid.cells().iter().all(|c| c.is_empty()));

    let (grid, _) = TerrainGenerator::new(&reg, &ConstantNoise(0.6))
        .generate(&size, &terrain)
        .unwrap();
    assert_eq!(grid.count_id(reg.id_by_name("ironOre").unwrap()), 27);
}

#[test]
fn disabled_terrain_skips_surface_lookup() {
    let reg = BlockRegistry::builtin();
    let terrain = TerrainParams {
        enable: false,
        surface: "lava".into(),
        ..TerrainParams::default()
    };
    let (_, stats) = TerrainGenerator::new(&reg, &ConstantNoise(0.0))
        .generate(&WorldSize::new(2, 2, None), &terrain)
        .unwrap();
    assert_eq!(stats.columns, 0);
}

#[test]
fn unknown_surface_block_is_reported() {
    let reg = BlockRegistry::builtin();
    let terrain = TerrainParams {
        surface: "lava".into(),
        ..TerrainParams::default()
    };
    let err = TerrainGenerator::new(&reg, &ConstantNoise(0.0))
        .generate(&WorldSize::new(2, 2, None), &terrain)
        .unwrap_err();
    match err {
        GenerationError::UnknownBlock { role, name } => {
            assert_eq!(role, "surface");
            assert_eq!(name, "lava");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_size_is_rejected_before_generation() {
    let reg = BlockRegistry::builtin();
    let err = TerrainGenerator::new(&reg, &ConstantNoise(0.0))
        .generate(&WorldSize::new(4, 0, None), &TerrainParams::default())
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Config(ConfigError::ZeroDimension { field: "height" })
    ));
}

#[test]
fn negative_terrain_scale_is_rejected() {
    let reg = BlockRegistry::builtin();
    let terrain = TerrainParams {
        scale: -30.0,
        ..TerrainParams::default()
    };
    let err = TerrainGenerator::new(&reg, &ConstantNoise(0.0))
        .generate(&WorldSize::new(4, 4, None), &terrain)
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Config(ConfigError::InvalidTerrainScale(_))
    ));
}

#[test]
fn oversized_world_fails_before_allocation() {
    let reg = BlockRegistry::builtin();
    let err = TerrainGenerator::new(&reg, &ConstantNoise(0.0))
        .generate(
            &WorldSize::new(usize::MAX / 2, usize::MAX / 2, None),
            &TerrainParams::default(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Config(ConfigError::TooLarge { .. })
    ));
}

#[test]
fn simplex_generation_is_deterministic() {
    let reg = BlockRegistry::builtin();
    let size = WorldSize::new(12, 12, None);
    let terrain = TerrainParams::default();
    let (a, _) = TerrainGenerator::new(&reg, &SimplexNoise::new())
        .generate(&size, &terrain)
        .unwrap();
    let (b, stats) = TerrainGenerator::new(&reg, &SimplexNoise::new())
        .generate(&size, &terrain)
        .unwrap();
    assert_eq!(a.cells(), b.cells());
    assert_eq!(stats.columns, 144);
    let max = stats.surface_max.unwrap() as i32;
    assert!(max <= 11);
    for x in 0..12 {
        for z in 0..12 {
            for y in (max + 1)..12 {
                assert_eq!(a.id_at(x, y, z), EMPTY);
            }
        }
    }
}
