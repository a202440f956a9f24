use strata_runtime::World;
use strata_world::GenStage;

pub fn log_summary(world: &World) {
    let grid = world.grid();
    log::info!(
        "world {}x{}x{} block_size={} capacity/type={}",
        grid.width(),
        grid.height(),
        grid.width(),
        grid.block_size(),
        world.capacity_per_type()
    );
    for b in world.batches().iter() {
        log::info!("  {:<8} id={:<3} instances={}", b.name, b.block_id, b.count());
    }
    let Some(stats) = world.last_stats() else {
        return;
    };
    log::info!(
        "instances={} culled={} gen_ms={} mesh_ms={}",
        stats.instances,
        stats.culled,
        stats.t_gen_ms,
        stats.t_mesh_ms
    );
    for stage in GenStage::ALL {
        log::debug!(
            "  stage {:<9} {}us",
            stage.label(),
            stats.generation.stage_duration(stage).as_micros()
        );
    }
}
