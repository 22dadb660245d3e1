//! Painter's-algorithm ordering.
//!
//! The sorter never moves particles. It keeps a separate list of pool
//! indices and reorders that, so a particle's slot in the pool stays fixed
//! for the lifetime of the layer while paint order changes every tick.

use crate::particle::Particle;
use std::cmp::Ordering;

/// Stable back-to-front ordering of a particle pool.
#[derive(Clone, Debug, Default)]
pub struct DepthSorter {
    order: Vec<usize>,
}

impl DepthSorter {
    /// A sorter for a pool of `len` particles, initially in pool order.
    pub fn new(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// Current paint order: pool indices, farthest first.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Re-sort by ascending depth key (`-z`), i.e. far to near.
    ///
    /// Ties keep their order from the previous call; on the first call that
    /// is pool order. Depths shift only slightly between ticks, so the
    /// previous order is nearly sorted and the in-place insertion pass is
    /// close to linear.
    pub fn sort_for_paint(&mut self, particles: &[Particle]) -> &[usize] {
        if self.order.len() != particles.len() {
            self.order.clear();
            self.order.extend(0..particles.len());
        }

        for i in 1..self.order.len() {
            let current = self.order[i];
            let key = particles[current].depth;
            let mut j = i;
            while j > 0 && compare(particles[self.order[j - 1]].depth, key) == Ordering::Greater {
                self.order[j] = self.order[j - 1];
                j -= 1;
            }
            self.order[j] = current;
        }

        &self.order
    }
}

/// Total order on depth keys. `-0.0` and `0.0` compare equal.
#[inline]
fn compare(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

/// Stable paint order for `particles`, farthest first.
///
/// Allocates a fresh index list. Per-tick callers should hold a
/// [`DepthSorter`] instead.
pub fn sort_for_paint(particles: &[Particle]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..particles.len()).collect();
    order.sort_by(|&a, &b| compare(particles[a].depth, particles[b].depth));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::SpriteHandle;
    use glam::DVec3;

    fn pool(depths: &[f64]) -> Vec<Particle> {
        depths
            .iter()
            .enumerate()
            .map(|(i, &z)| Particle::new(SpriteHandle(i as u32), DVec3::new(0.0, 0.0, z)))
            .collect()
    }

    #[test]
    fn test_far_particles_paint_first() {
        let particles = pool(&[100.0, 2500.0, 40.0, 900.0]);
        let mut sorter = DepthSorter::new(particles.len());

        assert_eq!(sorter.sort_for_paint(&particles), &[1, 3, 0, 2]);
    }

    #[test]
    fn test_equal_depths_keep_input_order() {
        let particles = pool(&[500.0, 700.0, 500.0, 500.0]);
        let mut sorter = DepthSorter::new(particles.len());

        assert_eq!(sorter.sort_for_paint(&particles), &[1, 0, 2, 3]);
        assert_eq!(sort_for_paint(&particles), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_signed_zero_depths_are_ties() {
        // Depths are 0.0 and -0.0.
        let particles = pool(&[-0.0, 0.0]);
        let mut sorter = DepthSorter::new(particles.len());

        assert_eq!(sorter.sort_for_paint(&particles), &[0, 1]);
        assert_eq!(sort_for_paint(&particles), vec![0, 1]);

        let reversed = pool(&[0.0, -0.0]);
        assert_eq!(sort_for_paint(&reversed), vec![0, 1]);
    }

    #[test]
    fn test_pool_is_not_permuted() {
        let particles = pool(&[10.0, 20.0, 30.0]);
        let before = particles.clone();
        let mut sorter = DepthSorter::new(particles.len());

        sorter.sort_for_paint(&particles);

        assert_eq!(particles, before);
    }

    #[test]
    fn test_resort_after_depths_change() {
        let mut particles = pool(&[10.0, 20.0, 30.0]);
        let mut sorter = DepthSorter::new(particles.len());
        assert_eq!(sorter.sort_for_paint(&particles), &[2, 1, 0]);

        // Particle 2 wraps to the near end.
        particles[2].depth = -5.0;
        assert_eq!(sorter.sort_for_paint(&particles), &[1, 0, 2]);
    }

    #[test]
    fn test_matches_library_stable_sort() {
        let depths: Vec<f64> = (0..64).map(|i| ((i * 37) % 11) as f64 * -100.0).collect();
        let particles = pool(&depths);
        let mut sorter = DepthSorter::new(particles.len());

        assert_eq!(sorter.sort_for_paint(&particles), sort_for_paint(&particles).as_slice());
    }
}
