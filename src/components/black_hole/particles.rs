//! Particle records and seeding.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::SimConfig;
use super::scale::Viewport;

/// Fixed polar offset of a ring particle from the attractor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingBinding {
	/// Radians around the attractor.
	pub angle: f64,
	/// Distance from the attractor in internal px.
	pub dist: f64,
}

impl RingBinding {
	/// Slot position for an attractor at `(cx, cy)`.
	pub fn target(&self, cx: f64, cy: f64) -> (f64, f64) {
		(
			cx + self.angle.cos() * self.dist,
			cy + self.angle.sin() * self.dist,
		)
	}
}

/// A single simulated particle.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Position in internal space.
	pub x: f64,
	pub y: f64,
	/// Velocity in internal px per frame.
	pub vx: f64,
	pub vy: f64,
	/// Edge length of the drawn square.
	pub size: f64,
	/// Set once at seed time. `None` means a free-drifting background particle.
	ring: Option<RingBinding>,
}

impl Particle {
	/// A particle at rest; `ring` fixes its identity for its whole lifetime.
	pub fn new(x: f64, y: f64, size: f64, ring: Option<RingBinding>) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size,
			ring,
		}
	}

	pub fn ring(&self) -> Option<&RingBinding> {
		self.ring.as_ref()
	}

	pub fn is_ring(&self) -> bool {
		self.ring.is_some()
	}
}

/// Draw batch a particle falls into for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderClass {
	Background,
	RingIdle,
	RingActive,
}

impl RenderClass {
	pub fn of(particle: &Particle, attractor_active: bool) -> Self {
		match (particle.is_ring(), attractor_active) {
			(false, _) => RenderClass::Background,
			(true, false) => RenderClass::RingIdle,
			(true, true) => RenderClass::RingActive,
		}
	}
}

/// Owns the particle collection for one seed.
#[derive(Clone, Debug)]
pub struct ParticleStore {
	pub particles: Vec<Particle>,
	/// Scaled ring radius the store was seeded with; the renderer's lensing uses it too.
	pub ring_radius: f64,
}

impl ParticleStore {
	/// Seed a fresh store around the viewport center.
	pub fn seed<R: Rng>(viewport: &Viewport, config: &SimConfig, rng: &mut R) -> Self {
		let ring_radius = viewport.to_internal(if viewport.is_mobile(config.mobile_breakpoint) {
			config.ring_radius_mobile
		} else {
			config.ring_radius_desktop
		});
		let (cx, cy) = viewport.center();
		let mut particles = Vec::with_capacity(config.particle_count);

		for _ in 0..config.particle_count {
			let ring = rng.gen_bool(config.ring_probability.clamp(0.0, 1.0)).then(|| RingBinding {
				angle: rng.gen_range(0.0..TAU),
				dist: ring_radius,
			});

			let (x, y) = match &ring {
				Some(binding) => {
					// Uniform direction, bounded magnitude: the seeded distance
					// to the center stays within radius +- jitter.
					let (tx, ty) = binding.target(cx, cy);
					let theta = rng.gen_range(0.0..TAU);
					let r = rng.r#gen::<f64>() * config.seed_jitter;
					(tx + theta.cos() * r, ty + theta.sin() * r)
				}
				None => (
					rng.r#gen::<f64>() * viewport.width,
					rng.r#gen::<f64>() * viewport.height,
				),
			};

			particles.push(Particle {
				x,
				y,
				vx: (rng.r#gen::<f64>() - 0.5) * config.initial_speed,
				vy: (rng.r#gen::<f64>() - 0.5) * config.initial_speed,
				size: config.size_min + rng.r#gen::<f64>() * (config.size_max - config.size_min),
				ring,
			});
		}

		Self {
			particles,
			ring_radius,
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn ring_count(&self) -> usize {
		self.particles.iter().filter(|p| p.is_ring()).count()
	}

	pub fn background_count(&self) -> usize {
		self.len() - self.ring_count()
	}
}
