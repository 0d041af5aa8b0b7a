//! Simulation state for one mounted canvas.
//!
//! Owns the particle store, the attractor and the reusable draw batches, and
//! runs a frame in a fixed order: attractor update, physics step, render.
//! Rebuilt in full (never resized in place) whenever the viewport changes.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::attractor::{Attractor, Pointer};
use super::config::SimConfig;
use super::particles::ParticleStore;
use super::physics::{self, Batches};
use super::render::{self, Lens, Surface};
use super::scale::Viewport;
use super::theme::Theme;

/// Everything the frame callback mutates.
#[derive(Clone, Debug)]
pub struct BlackHoleState {
	pub viewport: Viewport,
	pub config: SimConfig,
	pub store: ParticleStore,
	pub attractor: Attractor,
	pub pointer: Pointer,
	pub batches: Batches,
	rng: SmallRng,
}

impl BlackHoleState {
	/// Seed from OS entropy.
	pub fn new(viewport: Viewport, config: SimConfig) -> Self {
		Self::with_rng(viewport, config, SmallRng::from_entropy())
	}

	pub fn with_rng(viewport: Viewport, config: SimConfig, mut rng: SmallRng) -> Self {
		let store = ParticleStore::seed(&viewport, &config, &mut rng);
		let attractor = Attractor::new(&viewport, &config);
		let batches = Batches {
			background: Vec::with_capacity(store.len()),
			ring_idle: Vec::with_capacity(store.len()),
			ring_active: Vec::with_capacity(store.len()),
		};

		Self {
			viewport,
			config,
			store,
			attractor,
			pointer: Pointer::default(),
			batches,
			rng,
		}
	}

	/// Replace the store and attractor for a new viewport.
	pub fn reseed(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.store = ParticleStore::seed(&viewport, &self.config, &mut self.rng);
		self.attractor = Attractor::new(&viewport, &self.config);
		self.pointer = Pointer::default();
		self.batches.clear();
	}

	/// Pointer moved inside the container; coordinates in CSS pixels relative
	/// to the container's top-left corner.
	pub fn pointer_move(&mut self, css_x: f64, css_y: f64) {
		self.pointer = Pointer {
			x: self.viewport.to_internal(css_x),
			y: self.viewport.to_internal(css_y),
			active: true,
		};
	}

	pub fn pointer_leave(&mut self) {
		self.pointer.active = false;
	}

	pub fn lens(&self) -> Lens {
		Lens {
			ring_radius: self.store.ring_radius,
			strength: self.config.lens_strength,
			singularity_radius: self.config.singularity_radius,
		}
	}

	/// Advance the simulation one frame. Does nothing for a zero-area viewport.
	pub fn tick(&mut self) -> bool {
		if self.viewport.is_empty() {
			return false;
		}
		self.attractor.update(&self.pointer);
		physics::step(
			&mut self.store,
			&self.attractor,
			&self.viewport,
			&self.config,
			&mut self.rng,
			&mut self.batches,
		);
		true
	}

	/// Draw the batches built by the last [`tick`](Self::tick).
	pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, theme: Theme) -> usize {
		render::render(
			surface,
			&self.store,
			&self.batches,
			&self.attractor,
			&self.lens(),
			(self.viewport.width, self.viewport.height),
			theme,
		)
	}

	/// One full frame. `None` when the step was skipped.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, theme: Theme) -> Option<usize> {
		if !self.tick() {
			return None;
		}
		Some(self.draw(surface, theme))
	}
}
