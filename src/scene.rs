//! Layer stack.

use crate::config::LayerConfig;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::render::Frame;
use log::debug;

/// An ordered stack of layers, composited back to front.
///
/// Use method chaining to add layers, then drive every layer with the same
/// `delta_time` via [`advance`](Self::advance).
///
/// ```ignore
/// let mut scene = Scene::new()
///     .with_layer(LayerConfig::clouds())?
///     .with_layer(LayerConfig::stars())?;
///
/// scene.resize(1900.0, 1200.0);
/// scene.advance(clock.update());
/// for frame in scene.frames() {
///     renderer.draw(frame);
/// }
/// ```
#[derive(Debug, Default)]
pub struct Scene {
    layers: Vec<ParticleField>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ambient backdrop: sky clouds at the back, nebula clouds in front.
    pub fn ambient() -> Result<Self, ConfigError> {
        Self::new()
            .with_layer(LayerConfig::clouds())?
            .with_layer(LayerConfig::stars())
    }

    /// Build a layer from `config` and put it on top of the stack.
    pub fn with_layer(mut self, config: LayerConfig) -> Result<Self, ConfigError> {
        self.push(ParticleField::new(config)?);
        Ok(self)
    }

    /// Put an already built layer on top of the stack.
    pub fn push(&mut self, layer: ParticleField) {
        debug!("scene: layer '{}' at depth {}", layer.name(), self.layers.len());
        self.layers.push(layer);
    }

    /// Advance every layer by one tick.
    pub fn advance(&mut self, delta_time: f64) {
        for layer in &mut self.layers {
            layer.advance(delta_time);
        }
    }

    /// Centre every layer in a viewport of the given size.
    pub fn resize(&mut self, width: f64, height: f64) {
        for layer in &mut self.layers {
            layer.resize(width, height);
        }
    }

    /// Per-layer frames, backmost first.
    pub fn frames(&self) -> impl Iterator<Item = Frame<'_>> {
        self.layers.iter().map(ParticleField::frame)
    }

    /// Layers, backmost first.
    #[inline]
    pub fn layers(&self) -> &[ParticleField] {
        &self.layers
    }

    /// Look a layer up by name.
    pub fn layer(&self, name: &str) -> Option<&ParticleField> {
        self.layers.iter().find(|layer| layer.name() == name)
    }
}
