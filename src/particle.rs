//! Particle records.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

/// Opaque, non-owning reference to a renderable owned by the renderer.
///
/// The engine hands handles back untouched; what they index (a texture,
/// a sprite slot, an atlas frame) is up to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct SpriteHandle(pub u32);

/// Baseline size multiplier for a freshly built pool.
pub const DEFAULT_SCALE_RATIO: f64 = 2.0;

/// One drifting particle.
///
/// Allocated once when its layer is built and recycled in place from then
/// on. `alpha` is deliberately not clamped: below the fade threshold it
/// tracks depth linearly and goes negative once the particle passes the
/// camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// World position.
    pub position: DVec3,
    /// Baseline size multiplier.
    pub scale_ratio: f64,
    /// Horizontal scale factor; negative mirrors the sprite.
    pub scale_offset_x: f64,
    /// Vertical scale factor.
    pub scale_offset_y: f64,
    /// Sprite rotation in radians.
    pub rotation: f64,
    /// Rotation added every tick when the layer spins.
    pub rotation_speed: f64,
    /// Opacity.
    pub alpha: f64,
    /// Paint-order key from the last projection (`-position.z`).
    pub depth: f64,
    handle: SpriteHandle,
}

impl Particle {
    /// A particle at `position` with neutral scale, zero alpha and no spin.
    pub fn new(handle: SpriteHandle, position: DVec3) -> Self {
        Self {
            position,
            scale_ratio: DEFAULT_SCALE_RATIO,
            scale_offset_x: 1.0,
            scale_offset_y: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            alpha: 0.0,
            depth: -position.z,
            handle,
        }
    }

    /// The renderable this particle draws with.
    #[inline]
    pub fn handle(&self) -> SpriteHandle {
        self.handle
    }

    /// Whether the sprite is drawn mirrored.
    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.scale_offset_x < 0.0
    }
}
