use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{drain::Drain, phases::cull_points, wall::Wall};

/// Raindrop positions scattered over the wall for display.
///
/// They carry no water; the flow model is continuous.
#[derive(Debug, Default)]
pub struct RaindropSet {
    pub points: Vec<Vec2>,
}

impl RaindropSet {
    pub fn from_positions(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Samples `count` points uniformly in `[min.x, max.x) x [min.y, max.y)`.
    ///
    /// A degenerate axis (`max <= min`) places every point at `min` on it.
    pub fn random_in_rect(count: usize, min: Vec2, max: Vec2, rng: &mut impl Rng) -> Self {
        let points = (0..count)
            .map(|_| Vec2::new(uniform(rng, min.x, max.x), uniform(rng, min.y, max.y)))
            .collect();

        Self::from_positions(points)
    }

    /// Samples `count` points over the wall enclosing `drains`, between the
    /// lowest and highest drain.
    ///
    /// `seed` makes the scatter reproducible; `None` draws a fresh one.
    pub fn for_wall(drains: &[Drain], count: usize, seed: Option<u64>) -> Self {
        let Some(wall) = Wall::enclosing(drains) else {
            return Self::default();
        };
        let min_y = drains.iter().map(|d| d.height).min().unwrap_or_default();
        let max_y = drains.iter().map(|d| d.height).max().unwrap_or_default();

        let min = Vec2::new(wall.min_left_x as f32, min_y as f32);
        let max = Vec2::new(min.x + wall.width as f32, max_y as f32);

        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random_in_rect(count, min, max, &mut rng)
    }

    /// Drops every raindrop sheltered by a drain (see [`cull_points`]).
    pub fn cull(&mut self, drains: &[Drain]) {
        self.points = cull_points(drains, &self.points);
    }
}

fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_in_rect_stays_inside_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let min = Vec2::new(10.0, 5.0);
        let max = Vec2::new(90.0, 50.0);

        let set = RaindropSet::random_in_rect(500, min, max, &mut rng);

        assert_eq!(set.points.len(), 500);
        for p in &set.points {
            assert!(p.x >= min.x && p.x < max.x);
            assert!(p.y >= min.y && p.y < max.y);
        }
    }

    #[test]
    fn degenerate_axis_collapses_to_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let min = Vec2::new(1.0, 4.0);
        let max = Vec2::new(3.0, 4.0);

        let set = RaindropSet::random_in_rect(10, min, max, &mut rng);

        assert!(set.points.iter().all(|p| p.y == 4.0));
    }

    #[test]
    fn for_wall_is_reproducible_with_a_seed() {
        let drains = [Drain::new(50, 20, 40), Drain::new(30, 35, 60)];

        let a = RaindropSet::for_wall(&drains, 100, Some(0));
        let b = RaindropSet::for_wall(&drains, 100, Some(0));

        assert_eq!(a.points, b.points);
        for p in &a.points {
            assert!(p.x >= 20.0 && p.x < 60.0);
            assert!(p.y >= 30.0 && p.y < 50.0);
        }
    }

    #[test]
    fn cull_removes_points_under_drains() {
        let drains = [Drain::new(50, 20, 40)];
        let mut set =
            RaindropSet::from_positions(vec![Vec2::new(25.0, 10.0), Vec2::new(45.0, 10.0)]);

        set.cull(&drains);

        assert_eq!(set.points, vec![Vec2::new(45.0, 10.0)]);
    }

    #[test]
    fn for_wall_without_drains_is_empty() {
        assert!(RaindropSet::for_wall(&[], 10, Some(1)).points.is_empty());
    }
}
