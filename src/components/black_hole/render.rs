//! Canvas rendering for the black hole backdrop.
//!
//! A frame is a clear followed by exactly three fills, one per batch, so the
//! draw-call count does not grow with the particle count:
//! 1. Background particles, displaced outward by the lensing transform
//! 2. Idle ring particles at their true positions
//! 3. Active ring particles at their true positions
//!
//! The lensing is a stylized inverse-distance push, not real lensing physics.
//! It only affects where a background particle is drawn, never where it is.

use web_sys::CanvasRenderingContext2d;

use super::attractor::Attractor;
use super::particles::ParticleStore;
use super::physics::Batches;
use super::theme::{Color, Theme};

/// Drawing operations the renderer needs from its target.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn begin_batch(&mut self, color: Color);
	fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
	fn fill(&mut self);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn begin_batch(&mut self, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
	}

	fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::rect(self, x, y, w, h);
	}

	fn fill(&mut self) {
		CanvasRenderingContext2d::fill(self);
	}
}

/// Lensing tunables, in internal space.
#[derive(Clone, Copy, Debug)]
pub struct Lens {
	pub ring_radius: f64,
	pub strength: f64,
	pub singularity_radius: f64,
}

impl Lens {
	/// Draw position for a background particle at `(x, y)`, or `None` when it
	/// sits inside the singularity and must be skipped this frame.
	pub fn displace(&self, x: f64, y: f64, attractor: &Attractor) -> Option<(f64, f64)> {
		let (dx, dy) = (x - attractor.x, y - attractor.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < self.singularity_radius {
			return None;
		}

		let force = (self.ring_radius * self.strength) / dist;
		let shift = 1.0 + force / dist;
		Some((attractor.x + dx * shift, attractor.y + dy * shift))
	}
}

/// Renders one frame. Returns the number of particles actually drawn.
pub fn render<S: Surface + ?Sized>(
	surface: &mut S,
	store: &ParticleStore,
	batches: &Batches,
	attractor: &Attractor,
	lens: &Lens,
	size: (f64, f64),
	theme: Theme,
) -> usize {
	let palette = theme.palette();
	let particles = &store.particles;
	let mut drawn = 0;

	surface.clear(size.0, size.1);

	surface.begin_batch(palette.background);
	for &idx in &batches.background {
		let p = &particles[idx];
		if let Some((lx, ly)) = lens.displace(p.x, p.y, attractor) {
			surface.rect(lx, ly, p.size, p.size);
			drawn += 1;
		}
	}
	surface.fill();

	for (batch, color) in [
		(&batches.ring_idle, palette.ring_idle),
		(&batches.ring_active, palette.ring_active),
	] {
		surface.begin_batch(color);
		for &idx in batch {
			let p = &particles[idx];
			surface.rect(p.x, p.y, p.size, p.size);
			drawn += 1;
		}
		surface.fill();
	}

	drawn
}
