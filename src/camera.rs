//! Per-layer camera and its sway animation.
//!
//! Each layer owns exactly one [`Camera`]. Nothing but that layer's own
//! [`CameraSway`] driver moves it; particles never touch it.

use crate::error::{ensure_finite, ensure_positive, ConfigError};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Default focal length, in world units.
pub const DEFAULT_FOCAL_LENGTH: f64 = 400.0;

/// Simplified perspective camera.
///
/// Rotation is a set of Euler angles in radians, applied X, then Y, then Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: DVec3,
    /// Euler rotation in radians.
    pub rotation: DVec3,
    focal_length: f64,
}

impl Camera {
    /// Create a camera at the origin with no rotation.
    ///
    /// Fails if `focal_length` is not strictly positive.
    pub fn new(focal_length: f64) -> Result<Self, ConfigError> {
        ensure_positive("focal_length", focal_length)?;
        Ok(Self {
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            focal_length,
        })
    }

    /// Distance from the eye to the projection plane.
    #[inline]
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Change the focal length, rejecting non-positive values.
    pub fn set_focal_length(&mut self, focal_length: f64) -> Result<(), ConfigError> {
        ensure_positive("focal_length", focal_length)?;
        self.focal_length = focal_length;
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            focal_length: DEFAULT_FOCAL_LENGTH,
        }
    }
}

/// How the sway phase counter advances each tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwayClock {
    /// Advance by the tick's `delta_time`.
    TimeScaled,
    /// Advance by a constant step regardless of `delta_time`.
    Fixed {
        /// Phase increment per tick.
        step: f64,
    },
}

/// Gentle bob-and-roll animation for a layer camera.
///
/// Every tick the phase counter advances, then:
///
/// | Output | Formula |
/// |--------|---------|
/// | view roll | `roll_amplitude * cos(roll_frequency * count)` |
/// | camera y | `bob_amplitude * sin(bob_frequency * count) + bob_offset` |
/// | camera yaw | `yaw_amplitude * sin(yaw_frequency * count)` |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSway {
    /// Phase clock.
    pub clock: SwayClock,
    /// Amplitude of the 2-D view roll, radians.
    #[serde(default = "default_roll_amplitude")]
    pub roll_amplitude: f64,
    /// Angular frequency of the view roll.
    #[serde(default = "default_roll_frequency")]
    pub roll_frequency: f64,
    /// Vertical bob amplitude, world units.
    #[serde(default = "default_bob_amplitude")]
    pub bob_amplitude: f64,
    /// Angular frequency of the vertical bob.
    #[serde(default = "default_bob_frequency")]
    pub bob_frequency: f64,
    /// Constant vertical offset added to the bob.
    #[serde(default = "default_bob_offset")]
    pub bob_offset: f64,
    /// Yaw amplitude, radians.
    #[serde(default = "default_yaw_amplitude")]
    pub yaw_amplitude: f64,
    /// Angular frequency of the yaw.
    #[serde(default = "default_yaw_frequency")]
    pub yaw_frequency: f64,
    #[serde(skip)]
    count: f64,
}

fn default_roll_amplitude() -> f64 {
    0.08
}
fn default_roll_frequency() -> f64 {
    0.02
}
fn default_bob_amplitude() -> f64 {
    200.0
}
fn default_bob_frequency() -> f64 {
    0.03
}
fn default_bob_offset() -> f64 {
    -50.0
}
fn default_yaw_amplitude() -> f64 {
    0.2
}
fn default_yaw_frequency() -> f64 {
    0.01
}

impl CameraSway {
    /// Sway with the standard amplitudes and the given phase clock.
    pub fn new(clock: SwayClock) -> Self {
        Self {
            clock,
            roll_amplitude: default_roll_amplitude(),
            roll_frequency: default_roll_frequency(),
            bob_amplitude: default_bob_amplitude(),
            bob_frequency: default_bob_frequency(),
            bob_offset: default_bob_offset(),
            yaw_amplitude: default_yaw_amplitude(),
            yaw_frequency: default_yaw_frequency(),
            count: 0.0,
        }
    }

    /// Current phase counter.
    #[inline]
    pub fn count(&self) -> f64 {
        self.count
    }

    /// Advance the phase and move `camera`. Returns the 2-D view roll.
    pub fn apply(&mut self, camera: &mut Camera, delta_time: f64) -> f64 {
        self.count += match self.clock {
            SwayClock::TimeScaled => delta_time,
            SwayClock::Fixed { step } => step,
        };

        camera.position.y =
            self.bob_amplitude * (self.bob_frequency * self.count).sin() + self.bob_offset;
        camera.rotation.y = self.yaw_amplitude * (self.yaw_frequency * self.count).sin();

        self.roll_amplitude * (self.roll_frequency * self.count).cos()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let SwayClock::Fixed { step } = self.clock {
            ensure_finite("sway.step", step)?;
        }
        ensure_finite("sway.roll_amplitude", self.roll_amplitude)?;
        ensure_finite("sway.roll_frequency", self.roll_frequency)?;
        ensure_finite("sway.bob_amplitude", self.bob_amplitude)?;
        ensure_finite("sway.bob_frequency", self.bob_frequency)?;
        ensure_finite("sway.bob_offset", self.bob_offset)?;
        ensure_finite("sway.yaw_amplitude", self.yaw_amplitude)?;
        ensure_finite("sway.yaw_frequency", self.yaw_frequency)
    }
}
