//! Layer configuration.
//!
//! A [`LayerConfig`] is everything that distinguishes one layer from another.
//! The algorithm is identical across layers; only these numbers and
//! distributions change. Configurations serialize to JSON so layers can be
//! tuned without recompiling.

use crate::camera::{CameraSway, SwayClock, DEFAULT_FOCAL_LENGTH};
use crate::error::{ensure_finite, ensure_positive, ConfigError};
use crate::particle::DEFAULT_SCALE_RATIO;
use crate::spawn::{RespawnRotation, SpawnRange, SpawnY, SpinRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_focal_length() -> f64 {
    DEFAULT_FOCAL_LENGTH
}

fn default_fade_threshold_z() -> f64 {
    300.0
}

fn default_fade_ease_rate() -> f64 {
    0.01
}

fn default_flip_probability() -> f64 {
    0.5
}

fn default_initial_scale_ratio() -> f64 {
    DEFAULT_SCALE_RATIO
}

fn default_texture_count() -> u32 {
    1
}

/// Construction-time description of one particle layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LayerConfig {
    /// Human-readable layer name, used in logs.
    pub name: String,
    /// Fixed pool size.
    pub particle_count: u32,
    /// Number of distinct renderables; particle `i` draws with `i % texture_count`.
    #[serde(default = "default_texture_count")]
    pub texture_count: u32,
    /// Depth advance per unit of `delta_time` (negative moves towards the camera).
    pub speed_z: f64,
    /// Depth span particles wrap across.
    pub range_z: f64,
    /// Camera focal length.
    #[serde(default = "default_focal_length")]
    pub focal_length: f64,
    /// Depth below which alpha tracks `z / fade_threshold_z`.
    #[serde(default = "default_fade_threshold_z")]
    pub fade_threshold_z: f64,
    /// Per-tick easing factor towards full opacity above the threshold.
    #[serde(default = "default_fade_ease_rate")]
    pub fade_ease_rate: f64,
    /// Respawn x distribution.
    pub spawn_x: SpawnRange,
    /// Respawn y rule.
    pub spawn_y: SpawnY,
    /// Respawn horizontal scale distribution.
    pub scale_offset_x: SpawnRange,
    /// Respawn vertical scale distribution.
    pub scale_offset_y: SpawnRange,
    /// Chance that a respawned particle is mirrored.
    #[serde(default = "default_flip_probability")]
    pub flip_probability: f64,
    /// Scale ratio every particle starts with.
    #[serde(default = "default_initial_scale_ratio")]
    pub initial_scale_ratio: f64,
    /// Scale ratio assigned on respawn, if any.
    #[serde(default)]
    pub respawn_scale_ratio: Option<f64>,
    /// Rotation assigned on respawn.
    pub respawn_rotation: RespawnRotation,
    /// Optional continuous spin.
    #[serde(default)]
    pub spin: Option<SpinRule>,
    /// Optional camera animation.
    #[serde(default)]
    pub sway: Option<CameraSway>,
    /// RNG seed; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl LayerConfig {
    /// The near sky layer: 50 broad clouds banked over a horizon.
    pub fn clouds() -> Self {
        Self {
            name: "clouds".into(),
            particle_count: 50,
            texture_count: 2,
            speed_z: -15.0,
            range_z: 3000.0,
            focal_length: DEFAULT_FOCAL_LENGTH,
            fade_threshold_z: default_fade_threshold_z(),
            fade_ease_rate: default_fade_ease_rate(),
            spawn_x: SpawnRange::new(-4500.0, 4500.0),
            spawn_y: SpawnY::Horizon {
                baseline: 1200.0,
                slope: 0.2,
                spread: 200.0,
            },
            scale_offset_x: SpawnRange::new(0.6, 1.4),
            scale_offset_y: SpawnRange::new(0.9, 1.1),
            flip_probability: default_flip_probability(),
            initial_scale_ratio: DEFAULT_SCALE_RATIO,
            respawn_scale_ratio: Some(5.0),
            respawn_rotation: RespawnRotation::FromX { factor: -0.0002 },
            spin: None,
            sway: Some(CameraSway::new(SwayClock::TimeScaled)),
            seed: None,
        }
    }

    /// The far space layer: 30 slowly turning nebula clouds.
    pub fn stars() -> Self {
        Self {
            name: "stars".into(),
            particle_count: 30,
            texture_count: 3,
            speed_z: -5.0,
            range_z: 2000.0,
            focal_length: DEFAULT_FOCAL_LENGTH,
            fade_threshold_z: default_fade_threshold_z(),
            fade_ease_rate: default_fade_ease_rate(),
            spawn_x: SpawnRange::new(-4950.0, 4950.0),
            spawn_y: SpawnY::Uniform {
                range: SpawnRange::new(-4950.0, 4950.0),
            },
            scale_offset_x: SpawnRange::new(1.0, 1.2),
            scale_offset_y: SpawnRange::new(1.0, 1.2),
            flip_probability: default_flip_probability(),
            initial_scale_ratio: DEFAULT_SCALE_RATIO,
            respawn_scale_ratio: Some(5.0),
            respawn_rotation: RespawnRotation::Zero,
            spin: Some(SpinRule {
                initial_speed: 4.0,
                respawn_speed: SpawnRange::new(-0.0005, 0.0005),
            }),
            sway: Some(CameraSway::new(SwayClock::Fixed { step: 0.25 })),
            seed: None,
        }
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the pool size.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Replace or remove the camera animation.
    pub fn with_sway(mut self, sway: Option<CameraSway>) -> Self {
        self.sway = sway;
        self
    }

    /// Check every field. Called by [`ParticleField::new`](crate::ParticleField::new).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyPool(self.particle_count));
        }
        if self.texture_count == 0 {
            return Err(ConfigError::NonPositive {
                field: "texture_count",
                value: 0.0,
            });
        }
        ensure_positive("range_z", self.range_z)?;
        ensure_positive("focal_length", self.focal_length)?;
        ensure_positive("fade_threshold_z", self.fade_threshold_z)?;
        ensure_finite("speed_z", self.speed_z)?;
        ensure_finite("fade_ease_rate", self.fade_ease_rate)?;
        ensure_finite("initial_scale_ratio", self.initial_scale_ratio)?;
        if let Some(ratio) = self.respawn_scale_ratio {
            ensure_finite("respawn_scale_ratio", ratio)?;
        }
        if !(0.0..=1.0).contains(&self.flip_probability) {
            return Err(ConfigError::Probability {
                field: "flip_probability",
                value: self.flip_probability,
            });
        }

        self.spawn_x.validate("spawn_x")?;
        self.spawn_y.validate()?;
        self.scale_offset_x.validate("scale_offset_x")?;
        self.scale_offset_y.validate("scale_offset_y")?;
        self.respawn_rotation.validate()?;
        if let Some(spin) = &self.spin {
            spin.validate()?;
        }
        if let Some(sway) = &self.sway {
            sway.validate()?;
        }
        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
