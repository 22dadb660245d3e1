//! Renderer-facing output.
//!
//! After every tick a layer exposes its particles as [`RenderInstance`]s in
//! paint order. The records are plain `#[repr(C)]` data and can be copied
//! straight into a GPU instance buffer with `bytemuck::cast_slice`.
//!
//! The snapshot is valid until the next tick; renderers read it and never
//! write back.

use crate::particle::{Particle, SpriteHandle};
use crate::projection::Projection;
use bytemuck::{Pod, Zeroable};

/// One sprite draw: where, how big, how turned, how opaque, and which asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RenderInstance {
    /// Horizontal position relative to the layer origin.
    pub screen_x: f32,
    /// Vertical position relative to the layer origin.
    pub screen_y: f32,
    /// Horizontal scale; negative when mirrored.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
    /// Sprite rotation in radians.
    pub rotation: f32,
    /// Opacity, unclamped.
    pub alpha: f32,
    /// Renderable to draw.
    pub handle: SpriteHandle,
    _pad: u32,
}

impl RenderInstance {
    /// Combine a particle with its projection.
    ///
    /// Perspective scale is multiplied by the particle's baseline ratio and
    /// then by its per-axis offsets.
    pub fn new(particle: &Particle, projection: &Projection) -> Self {
        let base = projection.scale * particle.scale_ratio;
        Self {
            screen_x: projection.screen_x as f32,
            screen_y: projection.screen_y as f32,
            scale_x: (base * particle.scale_offset_x) as f32,
            scale_y: (base * particle.scale_offset_y) as f32,
            rotation: particle.rotation as f32,
            alpha: particle.alpha as f32,
            handle: particle.handle(),
            _pad: 0,
        }
    }
}

/// Everything a renderer needs to draw one layer for one tick.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Draws in paint order, farthest first.
    pub instances: &'a [RenderInstance],
    /// Screen-space origin the layer is centred on.
    pub origin: [f32; 2],
    /// Roll applied to the whole layer around its origin, radians.
    pub view_rotation: f32,
}

impl Frame<'_> {
    /// Raw bytes of the instance list, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.instances)
    }
}
