use std::hash::Hasher;
use std::sync::{Arc, RwLock};

use fastnoise_lite::{FastNoiseLite, NoiseType};
use fnv::FnvHasher;
use hashbrown::HashMap;

/// Deterministic coherent noise keyed by a string seed.
///
/// Output lies roughly in `[-1, 1]` and depends only on the seed and the
/// coordinates. Callers divide coordinates by their feature scale beforehand.
pub trait NoiseProvider {
    fn noise_2d(&self, seed: &str, x: f32, y: f32) -> f32;
    fn noise_3d(&self, seed: &str, x: f32, y: f32, z: f32) -> f32;
}

/// Stable 32-bit seed for a string (FNV-1a, folded to 32 bits).
pub fn seed_from_str(seed: &str) -> i32 {
    let mut h = FnvHasher::default();
    h.write(seed.as_bytes());
    let v = h.finish();
    ((v ^ (v >> 32)) as u32) as i32
}

fn build_generator(seed: &str) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed_from_str(seed));
    n.set_noise_type(Some(NoiseType::OpenSimplex2));
    n.set_frequency(Some(1.0));
    n
}

/// OpenSimplex2 noise with one lazily built generator per seed string.
#[derive(Default)]
pub struct SimplexNoise {
    cache: RwLock<HashMap<String, Arc<FastNoiseLite>>>,
}

impl SimplexNoise {
    pub fn new() -> Self {
        Self::default()
    }

    fn generator(&self, seed: &str) -> Arc<FastNoiseLite> {
        if let Ok(cache) = self.cache.read() {
            if let Some(existing) = cache.get(seed) {
                return Arc::clone(existing);
            }
        }
        let built = Arc::new(build_generator(seed));
        if let Ok(mut cache) = self.cache.write() {
            return Arc::clone(cache.entry(seed.to_string()).or_insert(built));
        }
        built
    }

    #[cfg(test)]
    fn cached_seeds(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl NoiseProvider for SimplexNoise {
    #[inline]
    fn noise_2d(&self, seed: &str, x: f32, y: f32) -> f32 {
        self.generator(seed).get_noise_2d(x, y)
    }

    #[inline]
    fn noise_3d(&self, seed: &str, x: f32, y: f32, z: f32) -> f32 {
        self.generator(seed).get_noise_3d(x, y, z)
    }
}

/// Same value everywhere. Useful for flat worlds and fixtures.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseProvider for ConstantNoise {
    fn noise_2d(&self, _seed: &str, _x: f32, _y: f32) -> f32 {
        self.0
    }

    fn noise_3d(&self, _seed: &str, _x: f32, _y: f32, _z: f32) -> f32 {
        self.0
    }
}
