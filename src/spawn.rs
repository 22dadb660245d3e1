//! Respawn distributions and the seeded sampler behind them.
//!
//! A layer describes *where* and *how* recycled particles reappear with the
//! data types here; the [`Spawner`] turns those descriptions into numbers.
//!
//! ```ignore
//! let mut spawner = Spawner::new(Some(7));
//! let x = spawner.sample(&SpawnRange::new(-4500.0, 4500.0));
//! let y = SpawnY::Horizon { baseline: 1200.0, slope: 0.2, spread: 200.0 }
//!     .sample(&mut spawner, x);
//! ```

use crate::error::{ensure_finite, ConfigError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Uniform distribution over `[min, max)`.
///
/// A degenerate range (`min == max`) always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl SpawnRange {
    /// Range from `min` to `max`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`.
    pub const fn constant(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Whether `value` lies inside the range (or equals a constant range).
    pub fn contains(&self, value: f64) -> bool {
        if self.min == self.max {
            value == self.min
        } else {
            value >= self.min && value < self.max
        }
    }

    pub(crate) fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        ensure_finite(field, self.min)?;
        ensure_finite(field, self.max)?;
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Rule for the vertical respawn position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnY {
    /// Independent of x.
    Uniform {
        /// Sampling range.
        range: SpawnRange,
    },
    /// Horizon bias: `y = baseline − |slope · x| + rand(0, spread)`.
    ///
    /// Particles far off to the side sit higher (smaller y), so the field
    /// bows up towards the edges like a cloud bank over a horizon.
    Horizon {
        /// y at `x = 0` before jitter.
        baseline: f64,
        /// How strongly |x| lifts the particle.
        slope: f64,
        /// Upper bound of the downward jitter.
        spread: f64,
    },
}

impl SpawnY {
    /// Draw a y coordinate for a particle respawning at `x`.
    pub fn sample(&self, spawner: &mut Spawner, x: f64) -> f64 {
        match *self {
            SpawnY::Uniform { range } => spawner.sample(&range),
            SpawnY::Horizon {
                baseline,
                slope,
                spread,
            } => baseline - (slope * x).abs() + spawner.sample(&SpawnRange::new(0.0, spread)),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SpawnY::Uniform { range } => range.validate("spawn_y.range"),
            SpawnY::Horizon {
                baseline,
                slope,
                spread,
            } => {
                ensure_finite("spawn_y.baseline", *baseline)?;
                ensure_finite("spawn_y.slope", *slope)?;
                SpawnRange::new(0.0, *spread).validate("spawn_y.spread")
            }
        }
    }
}

/// Rule for a recycled particle's rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RespawnRotation {
    /// Reset to zero.
    Zero,
    /// Tilt proportional to the new x position (`rotation = x · factor`).
    FromX {
        /// Radians per world unit.
        factor: f64,
    },
    /// Uniformly random.
    Random {
        /// Sampling range, radians.
        range: SpawnRange,
    },
}

impl RespawnRotation {
    /// Rotation for a particle respawning at `x`.
    pub fn sample(&self, spawner: &mut Spawner, x: f64) -> f64 {
        match *self {
            RespawnRotation::Zero => 0.0,
            RespawnRotation::FromX { factor } => x * factor,
            RespawnRotation::Random { range } => spawner.sample(&range),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            RespawnRotation::Zero => Ok(()),
            RespawnRotation::FromX { factor } => ensure_finite("rotation.factor", *factor),
            RespawnRotation::Random { range } => range.validate("rotation.range"),
        }
    }
}

/// Continuous per-tick spin.
///
/// The increment is per tick, not per unit of `delta_time`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinRule {
    /// Spin speed given to every particle when the pool is built.
    pub initial_speed: f64,
    /// Spin speed drawn on each respawn.
    pub respawn_speed: SpawnRange,
}

impl SpinRule {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("spin.initial_speed", self.initial_speed)?;
        self.respawn_speed.validate("spin.respawn_speed")
    }
}

/// Seeded random source for one layer.
///
/// Each layer owns its own spawner so that layers stay independent and a
/// fixed seed reproduces a run exactly.
#[derive(Clone, Debug)]
pub struct Spawner {
    seed: u64,
    rng: SmallRng,
}

impl Spawner {
    /// Create a spawner. Without a seed, one is drawn from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The seed this spawner started from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random f64 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Sample a uniform range. A constant range returns `min` without
    /// drawing.
    #[inline]
    pub fn sample(&mut self, range: &SpawnRange) -> f64 {
        if range.min >= range.max {
            return range.min;
        }
        self.rng.gen_range(range.min..range.max)
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_range() {
        let mut spawner = Spawner::new(Some(1));
        let range = SpawnRange::new(-4500.0, 4500.0);
        for _ in 0..1000 {
            assert!(range.contains(spawner.sample(&range)));
        }
    }

    #[test]
    fn test_constant_range() {
        let mut spawner = Spawner::new(Some(1));
        let range = SpawnRange::constant(5.0);
        assert_eq!(spawner.sample(&range), 5.0);
        assert!(range.contains(5.0));
    }

    #[test]
    fn test_narrow_range_stays_half_open() {
        let mut spawner = Spawner::new(Some(11));
        let range = SpawnRange::new(1.0, 1.0 + f64::EPSILON);
        for _ in 0..1000 {
            assert_eq!(spawner.sample(&range), 1.0);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut spawner = Spawner::new(Some(5));
        for _ in 0..100 {
            assert!(!spawner.chance(0.0));
            assert!(spawner.chance(1.0));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Spawner::new(Some(42));
        let mut b = Spawner::new(Some(42));
        for _ in 0..32 {
            assert_eq!(a.random(), b.random());
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_horizon_bias() {
        let mut spawner = Spawner::new(Some(9));
        let rule = SpawnY::Horizon {
            baseline: 1200.0,
            slope: 0.2,
            spread: 200.0,
        };
        for x in [-4500.0, -100.0, 0.0, 2500.0] {
            let y = rule.sample(&mut spawner, x);
            let floor = 1200.0 - (0.2f64 * x).abs();
            assert!(y >= floor && y < floor + 200.0, "y = {y} for x = {x}");
        }
    }

    #[test]
    fn test_rotation_rules() {
        let mut spawner = Spawner::new(Some(3));
        assert_eq!(RespawnRotation::Zero.sample(&mut spawner, 900.0), 0.0);
        let tilt = RespawnRotation::FromX { factor: -0.0002 }.sample(&mut spawner, 1000.0);
        assert!((tilt + 0.2).abs() < 1e-12);
        let range = SpawnRange::new(-1.0, 1.0);
        let r = RespawnRotation::Random { range }.sample(&mut spawner, 0.0);
        assert!(range.contains(r));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = SpawnRange::new(2.0, 1.0).validate("spawn_x").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { field: "spawn_x", .. }));
    }

    #[test]
    fn test_negative_spread_rejected() {
        let rule = SpawnY::Horizon {
            baseline: 0.0,
            slope: 1.0,
            spread: -5.0,
        };
        assert!(rule.validate().is_err());
    }
}
