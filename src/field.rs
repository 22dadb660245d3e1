//! Particle fields.
//!
//! A [`ParticleField`] is one layer: a fixed pool of particles, the camera
//! they are seen through, and the policy that recycles them. Each call to
//! [`advance`](ParticleField::advance) runs one complete tick:
//!
//! 1. every particle drifts, fades, spins and (if it passed the camera) is
//!    recycled;
//! 2. every particle is projected through the camera, respawned ones at
//!    their new position;
//! 3. the paint order is re-sorted far to near;
//! 4. render instances are written in paint order;
//! 5. the layer's camera sway moves the camera for the next tick.
//!
//! All buffers are sized at construction. Steady-state ticks do not
//! allocate.
//!
//! # Example
//!
//! ```ignore
//! let mut clouds = ParticleField::new(LayerConfig::clouds())?;
//! clouds.resize(1900.0, 1200.0);
//!
//! clouds.advance(1.0);
//! let frame = clouds.frame();
//! for instance in frame.instances {
//!     // draw instance.handle at (instance.screen_x, instance.screen_y) ...
//! }
//! ```

use crate::camera::{Camera, CameraSway};
use crate::config::LayerConfig;
use crate::error::ConfigError;
use crate::lifecycle::{Recycler, TickOutcome};
use crate::particle::{Particle, SpriteHandle};
use crate::projection::{CameraBasis, Projection};
use crate::render::{Frame, RenderInstance};
use crate::sort::DepthSorter;
use crate::spawn::Spawner;
use glam::DVec3;
use log::{debug, trace, warn};

/// One independently configured layer of drifting particles.
#[derive(Clone, Debug)]
pub struct ParticleField {
    name: String,
    particles: Vec<Particle>,
    camera: Camera,
    recycler: Recycler,
    spawner: Spawner,
    sway: Option<CameraSway>,
    sorter: DepthSorter,
    projections: Vec<Projection>,
    instances: Vec<RenderInstance>,
    view_rotation: f64,
    origin: [f64; 2],
    ticks: u64,
}

impl ParticleField {
    /// Build a layer from a configuration.
    ///
    /// The configuration is validated first; a rejected configuration
    /// produces no layer. Particle `i` starts at
    /// `z = -(range_z / particle_count) · i` with zero opacity, so the first
    /// tick recycles the whole pool and fans it out across the range.
    pub fn new(config: LayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let camera = Camera::new(config.focal_length)?;
        let spawner = Spawner::new(config.seed);
        let count = config.particle_count as usize;
        let spacing = config.range_z / config.particle_count as f64;
        let initial_spin = config.spin.map_or(0.0, |spin| spin.initial_speed);

        let particles: Vec<Particle> = (0..config.particle_count)
            .map(|i| {
                let handle = SpriteHandle(i % config.texture_count);
                let mut particle = Particle::new(handle, DVec3::new(0.0, 0.0, 0.0 - spacing * i as f64));
                particle.scale_ratio = config.initial_scale_ratio;
                particle.rotation_speed = initial_spin;
                particle
            })
            .collect();

        debug!(
            "layer '{}': {} particles over {} units, seed {}",
            config.name,
            count,
            config.range_z,
            spawner.seed()
        );

        let mut field = Self {
            recycler: Recycler::new(&config),
            name: config.name,
            particles,
            camera,
            spawner,
            sway: config.sway,
            sorter: DepthSorter::new(count),
            projections: vec![
                Projection {
                    screen_x: 0.0,
                    screen_y: 0.0,
                    scale: 1.0,
                    depth_key: 0.0,
                    clamped: false,
                };
                count
            ],
            instances: vec![RenderInstance::default(); count],
            view_rotation: 0.0,
            origin: [0.0, 0.0],
            ticks: 0,
        };
        field.project_and_sort();
        Ok(field)
    }

    /// Run one tick.
    ///
    /// `delta_time` is taken as given: the driver is responsible for
    /// clamping and scaling it (see [`FrameClock`](crate::time::FrameClock)).
    pub fn advance(&mut self, delta_time: f64) {
        for (index, particle) in self.particles.iter_mut().enumerate() {
            match self.recycler.step(particle, &mut self.spawner, delta_time) {
                TickOutcome::Drifted => {}
                TickOutcome::Recycled => {
                    trace!("layer '{}': recycled particle {index}", self.name);
                }
                TickOutcome::RecycledBehind => {
                    warn!(
                        "layer '{}': particle {index} still behind camera after wrap (z = {})",
                        self.name, particle.position.z
                    );
                }
            }
        }

        self.project_and_sort();

        if let Some(sway) = &mut self.sway {
            self.view_rotation = sway.apply(&mut self.camera, delta_time);
        }
        self.ticks += 1;
    }

    /// Project every particle, re-sort, and rewrite the render instances.
    fn project_and_sort(&mut self) {
        let basis = CameraBasis::new(&self.camera);
        let mut clamped = 0usize;

        for (particle, projection) in self.particles.iter_mut().zip(&mut self.projections) {
            *projection = basis.project(particle.position);
            particle.depth = projection.depth_key;
            clamped += projection.clamped as usize;
        }
        if clamped > 0 {
            trace!(
                "layer '{}': clamped perspective for {clamped} particles",
                self.name
            );
        }

        let order = self.sorter.sort_for_paint(&self.particles);
        for (slot, &index) in self.instances.iter_mut().zip(order) {
            *slot = RenderInstance::new(&self.particles[index], &self.projections[index]);
        }
    }

    /// Snapshot for the renderer, valid until the next tick.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            instances: &self.instances,
            origin: [self.origin[0] as f32, self.origin[1] as f32],
            view_rotation: self.view_rotation as f32,
        }
    }

    /// Centre the layer in a viewport of the given size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.origin = [width / 2.0, height / 2.0];
    }

    /// The particle pool, in stable slot order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Pool indices in paint order, farthest first.
    #[inline]
    pub fn paint_order(&self) -> &[usize] {
        self.sorter.order()
    }

    /// Projection of pool slot `index` from the last tick.
    #[inline]
    pub fn projection(&self, index: usize) -> Option<&Projection> {
        self.projections.get(index)
    }

    /// The layer camera.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current 2-D roll of the whole layer.
    #[inline]
    pub fn view_rotation(&self) -> f64 {
        self.view_rotation
    }

    /// Layer name from the configuration.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seed of the layer's random source.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    /// Ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Depth span particles wrap across.
    #[inline]
    pub fn range_z(&self) -> f64 {
        self.recycler.range_z()
    }

    /// Pool size.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false: validated layers hold at least one particle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
