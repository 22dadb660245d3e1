//! Particle lifecycle: drift, fade and recycle.
//!
//! Particles never die. Each tick a particle drifts along z, its opacity is
//! updated from its depth, and once it passes the camera (`z < 0`) it is
//! recycled in place at the far end of the layer with freshly sampled
//! position, scale and rotation.
//!
//! # Fade
//!
//! Opacity has two regimes:
//!
//! | Depth | Alpha |
//! |-------|-------|
//! | `z < fade_threshold_z` | `z / fade_threshold_z` (exact, may go negative) |
//! | otherwise | `alpha += fade_ease_rate · (1 − alpha)` |
//!
//! A particle therefore fades out linearly as it approaches the camera and is
//! fully invisible by the time it wraps. It reappears with `alpha = 0` far
//! away and eases in, so nothing ever pops at full opacity.
//!
//! # Wrap
//!
//! Exactly one wrap check runs per tick: `z += range_z` once. A `delta_time`
//! large enough to carry a particle more than one full range behind the
//! camera leaves it negative until a later tick catches it up.

use crate::config::LayerConfig;
use crate::particle::Particle;
use crate::spawn::{RespawnRotation, SpawnRange, SpawnY, Spawner, SpinRule};

/// What happened to a particle during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still in range; only drift and fade were applied.
    Drifted,
    /// Crossed the near boundary and was respawned at the far end.
    Recycled,
    /// Respawned, but one wrap was not enough to bring `z` back to `>= 0`.
    RecycledBehind,
}

impl TickOutcome {
    /// Whether the particle was respawned this tick.
    #[inline]
    pub fn is_recycled(self) -> bool {
        !matches!(self, TickOutcome::Drifted)
    }
}

/// Per-layer recycling policy.
///
/// Built once from a validated [`LayerConfig`]; holds only plain numbers and
/// distributions, so it is cheap to copy.
#[derive(Clone, Copy, Debug)]
pub struct Recycler {
    speed_z: f64,
    range_z: f64,
    fade_threshold_z: f64,
    fade_ease_rate: f64,
    spawn_x: SpawnRange,
    spawn_y: SpawnY,
    scale_offset_x: SpawnRange,
    scale_offset_y: SpawnRange,
    flip_probability: f64,
    respawn_scale_ratio: Option<f64>,
    respawn_rotation: RespawnRotation,
    spin: Option<SpinRule>,
}

impl Recycler {
    /// Extract the lifecycle parameters from a layer configuration.
    pub fn new(config: &LayerConfig) -> Self {
        Self {
            speed_z: config.speed_z,
            range_z: config.range_z,
            fade_threshold_z: config.fade_threshold_z,
            fade_ease_rate: config.fade_ease_rate,
            spawn_x: config.spawn_x,
            spawn_y: config.spawn_y,
            scale_offset_x: config.scale_offset_x,
            scale_offset_y: config.scale_offset_y,
            flip_probability: config.flip_probability,
            respawn_scale_ratio: config.respawn_scale_ratio,
            respawn_rotation: config.respawn_rotation,
            spin: config.spin,
        }
    }

    /// Depth span particles wrap across.
    #[inline]
    pub fn range_z(&self) -> f64 {
        self.range_z
    }

    /// Run one full tick for `particle`: drift, fade, spin, then wrap.
    pub fn step(&self, particle: &mut Particle, spawner: &mut Spawner, delta_time: f64) -> TickOutcome {
        particle.position.z += self.speed_z * delta_time;
        self.fade(particle);
        self.spin(particle);

        if particle.position.z < 0.0 {
            self.respawn(particle, spawner);
            if particle.position.z < 0.0 {
                return TickOutcome::RecycledBehind;
            }
            return TickOutcome::Recycled;
        }
        TickOutcome::Drifted
    }

    /// Update opacity from the current depth.
    pub fn fade(&self, particle: &mut Particle) {
        if particle.position.z < self.fade_threshold_z {
            particle.alpha = particle.position.z / self.fade_threshold_z;
        } else {
            particle.alpha += self.fade_ease_rate * (1.0 - particle.alpha);
        }
    }

    /// Apply the layer's continuous spin, if it has one.
    pub fn spin(&self, particle: &mut Particle) {
        if self.spin.is_some() {
            particle.rotation += particle.rotation_speed;
        }
    }

    /// Move `particle` to the far end of the range with fresh attributes.
    ///
    /// Performs a single `z += range_z`; callers check whether that sufficed.
    pub fn respawn(&self, particle: &mut Particle, spawner: &mut Spawner) {
        if let Some(ratio) = self.respawn_scale_ratio {
            particle.scale_ratio = ratio;
        }
        if let Some(spin) = &self.spin {
            particle.rotation_speed = spawner.sample(&spin.respawn_speed);
        }

        particle.position.z += self.range_z;
        let x = spawner.sample(&self.spawn_x);
        particle.position.x = x;
        particle.position.y = self.spawn_y.sample(spawner, x);
        particle.rotation = self.respawn_rotation.sample(spawner, x);
        particle.alpha = 0.0;

        particle.scale_offset_x = spawner.sample(&self.scale_offset_x);
        particle.scale_offset_y = spawner.sample(&self.scale_offset_y);
        if spawner.chance(self.flip_probability) {
            particle.scale_offset_x = -particle.scale_offset_x;
        }
    }
}
