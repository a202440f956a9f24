mod cli;
mod report;
mod watchers;

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use strata_blocks::BlockRegistry;
use strata_runtime::World;
use strata_world::{SimplexNoise, WorldGenConfig, load_config_from_path};

use crate::cli::Args;

fn load_config(args: &Args) -> Result<WorldGenConfig, Box<dyn Error>> {
    let mut cfg = if args.config.exists() {
        load_config_from_path(&args.config)?
    } else {
        log::warn!(
            "worldgen config {} not found; using defaults",
            args.config.display()
        );
        WorldGenConfig::default()
    };
    args.apply_overrides(&mut cfg);
    Ok(cfg)
}

fn load_registry(path: Option<&Path>) -> Result<BlockRegistry, Box<dyn Error>> {
    match path {
        Some(p) => {
            let reg = BlockRegistry::load_from_path(p)?;
            log::info!("loaded {} block types from {}", reg.len(), p.display());
            Ok(reg)
        }
        None => Ok(BlockRegistry::builtin()),
    }
}

fn build_world(args: &Args, base: &BlockRegistry) -> Result<World, Box<dyn Error>> {
    let cfg = load_config(args)?;
    let mut world = World::from_config(&cfg, base.clone(), Box::new(SimplexNoise::new()))?;
    world.generate()?;
    Ok(world)
}

/// Rebuilds from the current file. The previous world stays in place when the
/// rebuild fails.
fn reload_world(args: &Args, base: &BlockRegistry, world: &mut World) -> bool {
    match build_world(args, base) {
        Ok(w) => {
            *world = w;
            log::info!("worldgen config reloaded from {}", args.config.display());
            true
        }
        Err(e) => {
            log::warn!(
                "worldgen config reload failed ({}): {}",
                args.config.display(),
                e
            );
            false
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let base = load_registry(args.blocks.as_deref())?;
    let mut world = match build_world(&args, &base) {
        Ok(w) => w,
        Err(e) => {
            log::error!("generation failed: {}", e);
            return Err(e);
        }
    };
    report::log_summary(&world);

    if !args.watch {
        return Ok(());
    }

    let rx = watchers::spawn_worldgen_watcher(args.config.clone());
    log::info!("watching {} for changes", args.config.display());
    while rx.recv().is_ok() {
        // Editors often emit several events per save.
        std::thread::sleep(Duration::from_millis(50));
        for _ in rx.try_iter() {}
        if reload_world(&args, &base, &mut world) {
            report::log_summary(&world);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_keeps_last_good_world_on_bad_file() {
        let path = std::env::temp_dir().join(format!("strata-reload-{}.toml", std::process::id()));
        std::fs::write(&path, "[size]\nwidth = 4\nheight = 4\n").unwrap();
        let args = Args::parse_from(["strata", "--config", path.to_str().unwrap()]);
        let base = BlockRegistry::builtin();

        let mut world = build_world(&args, &base).unwrap();
        assert_eq!(world.capacity_per_type(), 64);

        std::fs::write(&path, "[size]\nwidth = 0\n").unwrap();
        assert!(!reload_world(&args, &base, &mut world));
        assert_eq!(world.capacity_per_type(), 64);
        assert_eq!(world.size.width, 4);

        std::fs::write(&path, "[size]\nwidth = 2\nheight = 3\n").unwrap();
        assert!(reload_world(&args, &base, &mut world));
        assert_eq!(world.capacity_per_type(), 12);

        let _ = std::fs::remove_file(&path);
    }
}
