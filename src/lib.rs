//! # driftfield
//!
//! Ambient backdrops of drifting, depth-ordered particles seen through a
//! simple perspective camera. The field looks infinite but never allocates
//! after construction: particles that pass the camera are recycled at the
//! far end of their layer.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! let mut scene = Scene::ambient()?;
//! let mut clock = FrameClock::new();
//! scene.resize(1900.0, 1200.0);
//!
//! loop {
//!     scene.advance(clock.update());
//!     for frame in scene.frames() {
//!         // draw frame.instances in order, offset by frame.origin and
//!         // rolled by frame.view_rotation
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Layers
//!
//! A layer ([`ParticleField`]) is a fixed pool of particles plus one
//! [`Camera`]. Layers differ only in data ([`LayerConfig`]): pool size,
//! drift speed, wrap range and respawn distributions. Two presets ship:
//! [`LayerConfig::clouds`] and [`LayerConfig::stars`].
//!
//! ### Ticks
//!
//! Each tick a layer drifts every particle along z, fades it by depth,
//! recycles anything that passed the camera, projects the pool, and
//! re-sorts paint order far to near. The driver supplies `delta_time`;
//! [`FrameClock`](time::FrameClock) is one such driver.
//!
//! ### Output
//!
//! [`Frame`] exposes one [`RenderInstance`] per particle in paint order.
//! Instances are `bytemuck::Pod` and can be uploaded as-is.
//!
//! | Stage | Module |
//! |-------|--------|
//! | Drift, fade, recycle | [`lifecycle`] |
//! | Perspective projection | [`projection`] |
//! | Paint order | [`sort`] |
//! | Respawn distributions | [`spawn`] |

mod camera;
pub mod config;
mod error;
pub mod field;
pub mod lifecycle;
mod particle;
pub mod projection;
pub mod render;
mod scene;
pub mod sort;
pub mod spawn;
pub mod time;

pub use camera::{Camera, CameraSway, SwayClock, DEFAULT_FOCAL_LENGTH};
pub use config::LayerConfig;
pub use error::ConfigError;
pub use field::ParticleField;
pub use glam::DVec3;
pub use lifecycle::{Recycler, TickOutcome};
pub use particle::{Particle, SpriteHandle, DEFAULT_SCALE_RATIO};
pub use projection::{project, CameraBasis, Projection};
pub use render::{Frame, RenderInstance};
pub use scene::Scene;
pub use sort::{sort_for_paint, DepthSorter};
pub use spawn::{RespawnRotation, SpawnRange, SpawnY, Spawner, SpinRule};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, CameraSway, SwayClock};
    pub use crate::config::LayerConfig;
    pub use crate::error::ConfigError;
    pub use crate::field::ParticleField;
    pub use crate::particle::{Particle, SpriteHandle};
    pub use crate::render::{Frame, RenderInstance};
    pub use crate::scene::Scene;
    pub use crate::spawn::{RespawnRotation, SpawnRange, SpawnY, SpinRule};
    pub use crate::time::FrameClock;
    pub use crate::DVec3;
}
