//! Seeded random drain layouts.
//!
//! Each generation step draws from its own ChaCha stream keyed by
//! `(master_seed, step)`, so a step's output does not depend on how much
//! randomness earlier steps consumed.

use std::collections::HashSet;

use log::debug;
use rand::{Rng, SeedableRng, seq::IndexedRandom, seq::index};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::GeneratorConfig,
    drain::{Drain, DrainSet},
    error::DrainError,
    types::Coord,
};

/// Random source for generation step `step` under `master_seed`.
pub fn step_rng(master_seed: u64, step: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    rng.set_stream(step);
    rng
}

/// Generates a random, non-overlapping drain layout.
///
/// Every step picks a height not used yet, a number of drains `n` in
/// `[1, max_drains_per_height)` and `2n` distinct x-positions inside the
/// wall. Sorted, consecutive pairs of positions become the drains at
/// that height, so drains sharing a height never touch. Generation stops
/// as soon as `count` drains exist.
///
/// ### Errors
/// - [`DrainError::EmptyLayout`] if `count == 0`.
/// - [`DrainError::InvalidGenerator`] for an inverted wall, a wall
///   narrower than 2 units, or `max_drains_per_height <= 1`.
/// - [`DrainError::CapacityExceeded`] if every height is used before
///   `count` drains are placed.
pub fn generate_random_drains(cfg: &GeneratorConfig) -> Result<DrainSet, DrainError> {
    check_config(cfg)?;

    let master_seed = cfg.seed.unwrap_or_else(|| rand::rng().random());
    let wall_width = (i64::from(cfg.wall_right_x) - i64::from(cfg.wall_left_x)) as usize;

    let mut used_heights: HashSet<Coord> = HashSet::new();
    let mut drains = Vec::with_capacity(cfg.count);
    let mut step = 0u64;

    while drains.len() < cfg.count {
        let mut rng = step_rng(master_seed, step);

        let free_heights: Vec<Coord> = (cfg.wall_min_height..cfg.wall_max_height)
            .filter(|h| !used_heights.contains(h))
            .collect();
        let Some(&height) = free_heights.choose(&mut rng) else {
            return Err(DrainError::CapacityExceeded {
                requested: cfg.count,
                placed: drains.len(),
            });
        };
        used_heights.insert(height);

        let per_height = rng
            .random_range(1..cfg.max_drains_per_height)
            .min(wall_width / 2);
        let mut xs: Vec<Coord> = index::sample(&mut rng, wall_width, 2 * per_height)
            .into_iter()
            .map(|offset| cfg.wall_left_x + offset as Coord)
            .collect();
        xs.sort_unstable();

        debug!("step {step}: {per_height} drains at height {height}");

        for pair in xs.chunks_exact(2) {
            if drains.len() == cfg.count {
                break;
            }
            drains.push(Drain::new(height, pair[0], pair[1]));
        }
        step += 1;
    }

    Ok(DrainSet::from_drains(drains))
}

fn check_config(cfg: &GeneratorConfig) -> Result<(), DrainError> {
    if cfg.count == 0 {
        return Err(DrainError::EmptyLayout);
    }
    if cfg.max_drains_per_height <= 1 {
        return Err(DrainError::InvalidGenerator(
            "max_drains_per_height must be greater than 1",
        ));
    }
    if cfg.wall_right_x <= cfg.wall_left_x {
        return Err(DrainError::InvalidGenerator(
            "wall_right_x must be greater than wall_left_x",
        ));
    }
    if i64::from(cfg.wall_right_x) - i64::from(cfg.wall_left_x) < 2 {
        return Err(DrainError::InvalidGenerator(
            "the wall must be at least 2 units wide",
        ));
    }
    if cfg.wall_max_height <= cfg.wall_min_height {
        return Err(DrainError::InvalidGenerator(
            "wall_max_height must be greater than wall_min_height",
        ));
    }
    Ok(())
}
