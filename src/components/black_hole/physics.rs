//! Per-frame particle integration and batch classification.

use rand::Rng;

use super::attractor::Attractor;
use super::config::SimConfig;
use super::particles::{Particle, ParticleStore, RenderClass};
use super::scale::Viewport;

/// Particle indices grouped by draw class for one frame.
///
/// The vectors are cleared and refilled every step; only their capacity
/// survives between frames.
#[derive(Clone, Debug, Default)]
pub struct Batches {
	pub background: Vec<usize>,
	pub ring_idle: Vec<usize>,
	pub ring_active: Vec<usize>,
}

impl Batches {
	pub fn clear(&mut self) {
		self.background.clear();
		self.ring_idle.clear();
		self.ring_active.clear();
	}

	pub fn push(&mut self, class: RenderClass, idx: usize) {
		match class {
			RenderClass::Background => self.background.push(idx),
			RenderClass::RingIdle => self.ring_idle.push(idx),
			RenderClass::RingActive => self.ring_active.push(idx),
		}
	}

	pub fn total(&self) -> usize {
		self.background.len() + self.ring_idle.len() + self.ring_active.len()
	}
}

/// Advance every particle one frame and rebuild the draw batches.
///
/// The attractor must already be updated for this frame.
pub fn step<R: Rng>(
	store: &mut ParticleStore,
	attractor: &Attractor,
	viewport: &Viewport,
	config: &SimConfig,
	rng: &mut R,
	batches: &mut Batches,
) {
	batches.clear();
	let half_noise = config.velocity_noise / 2.0;

	for (idx, p) in store.particles.iter_mut().enumerate() {
		let noise = (
			rng.gen_range(-half_noise..=half_noise),
			rng.gen_range(-half_noise..=half_noise),
		);
		advance(p, noise, attractor, viewport, config);
		batches.push(RenderClass::of(p, attractor.is_active), idx);
	}
}

/// Deterministic part of the update for a single particle.
fn advance(
	p: &mut Particle,
	(nx, ny): (f64, f64),
	attractor: &Attractor,
	viewport: &Viewport,
	config: &SimConfig,
) {
	p.vx += nx;
	p.vy += ny;

	match p.ring().copied() {
		Some(binding) => {
			let (tx, ty) = binding.target(attractor.x, attractor.y);
			p.vx += (tx - p.x) * config.ring_spring;
			p.vy += (ty - p.y) * config.ring_spring;
			p.vx *= config.ring_damping;
			p.vy *= config.ring_damping;
			p.x += p.vx;
			p.y += p.vy;
		}
		None => {
			p.vx *= config.background_damping;
			p.vy *= config.background_damping;
			p.x += p.vx;
			p.y += p.vy;
			wrap(p, viewport);
		}
	}
}

/// Exit one edge, re-enter at the opposite one.
fn wrap(p: &mut Particle, viewport: &Viewport) {
	if p.x < 0.0 {
		p.x = viewport.width;
	} else if p.x > viewport.width {
		p.x = 0.0;
	}
	if p.y < 0.0 {
		p.y = viewport.height;
	} else if p.y > viewport.height {
		p.y = 0.0;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::black_hole::attractor::Pointer;
	use crate::components::black_hole::particles::RingBinding;

	fn setup() -> (Viewport, SimConfig, Attractor) {
		let vp = Viewport::new(800.0, 600.0, 1920.0);
		let config = SimConfig::default();
		let attractor = Attractor::new(&vp, &config);
		(vp, config, attractor)
	}

	fn store_of(particles: Vec<Particle>) -> ParticleStore {
		ParticleStore {
			particles,
			ring_radius: 300.0,
		}
	}

	#[test]
	fn test_background_wraps_left_edge_same_frame() {
		let (vp, config, attractor) = setup();
		let mut p = Particle::new(0.5, 300.0, 1.0, None);
		p.vx = -2.0;
		advance(&mut p, (0.0, 0.0), &attractor, &vp, &config);
		assert_eq!(p.x, vp.width);
	}

	#[test]
	fn test_background_wraps_all_edges() {
		let (vp, config, attractor) = setup();
		let mut right = Particle::new(799.5, 300.0, 1.0, None);
		right.vx = 2.0;
		let mut top = Particle::new(400.0, 0.5, 1.0, None);
		top.vy = -2.0;
		let mut bottom = Particle::new(400.0, 599.5, 1.0, None);
		bottom.vy = 2.0;

		for p in [&mut right, &mut top, &mut bottom] {
			advance(p, (0.0, 0.0), &attractor, &vp, &config);
		}
		assert_eq!(right.x, 0.0);
		assert_eq!(top.y, vp.height);
		assert_eq!(bottom.y, 0.0);
	}

	#[test]
	fn test_ring_follows_attractor_off_canvas() {
		let (vp, config, mut attractor) = setup();
		let binding = RingBinding {
			angle: 0.0,
			dist: 300.0,
		};
		let mut store = store_of(vec![Particle::new(700.0, 300.0, 1.0, Some(binding))]);
		let pointer = Pointer {
			x: 2000.0,
			y: -500.0,
			active: true,
		};
		let mut rng = SmallRng::seed_from_u64(1);
		let mut batches = Batches::default();

		for _ in 0..600 {
			attractor.update(&pointer);
			step(&mut store, &attractor, &vp, &config, &mut rng, &mut batches);
		}

		let p = &store.particles[0];
		assert!(p.x > vp.width, "x {}", p.x);
		assert!(p.y < 0.0, "y {}", p.y);
		let (tx, ty) = binding.target(attractor.x, attractor.y);
		assert!((p.x - tx).abs() < 5.0 && (p.y - ty).abs() < 5.0);
	}

	#[test]
	fn test_ring_damping_is_stronger() {
		let (vp, config, attractor) = setup();
		let (cx, cy) = attractor.position();
		let binding = RingBinding {
			angle: 0.0,
			dist: 100.0,
		};
		let (tx, ty) = binding.target(cx, cy);
		let mut ring = Particle::new(tx, ty, 1.0, Some(binding));
		ring.vx = 1.0;
		let mut bg = Particle::new(tx, ty, 1.0, None);
		bg.vx = 1.0;

		advance(&mut ring, (0.0, 0.0), &attractor, &vp, &config);
		advance(&mut bg, (0.0, 0.0), &attractor, &vp, &config);
		assert!((ring.vx - config.ring_damping).abs() < 1e-12);
		assert!((bg.vx - config.background_damping).abs() < 1e-12);
		assert!(ring.vx < bg.vx);
	}

	#[test]
	fn test_ring_settles_on_its_slot() {
		let (vp, config, attractor) = setup();
		let binding = RingBinding {
			angle: 1.0,
			dist: 300.0,
		};
		let (tx, ty) = binding.target(attractor.x, attractor.y);
		let mut p = Particle::new(tx + 10.0, ty - 10.0, 1.0, Some(binding));
		for _ in 0..200 {
			advance(&mut p, (0.0, 0.0), &attractor, &vp, &config);
		}
		assert!((p.x - tx).abs() < 0.01 && (p.y - ty).abs() < 0.01);
	}

	#[test]
	fn test_batches_partition_every_particle() {
		let (vp, config, mut attractor) = setup();
		let mut rng = SmallRng::seed_from_u64(21);
		let mut store = ParticleStore::seed(&vp, &config, &mut rng);
		let mut batches = Batches::default();
		let idle = Pointer::default();
		let active = Pointer {
			x: 100.0,
			y: 100.0,
			active: true,
		};

		attractor.update(&idle);
		step(&mut store, &attractor, &vp, &config, &mut rng, &mut batches);
		assert_eq!(batches.total(), store.len());
		assert_eq!(batches.ring_idle.len(), store.ring_count());
		assert!(batches.ring_active.is_empty());

		attractor.update(&active);
		step(&mut store, &attractor, &vp, &config, &mut rng, &mut batches);
		assert_eq!(batches.total(), store.len());
		assert_eq!(batches.ring_active.len(), store.ring_count());
		assert!(batches.ring_idle.is_empty());
		assert_eq!(batches.background.len(), store.background_count());
	}

	#[test]
	fn test_identity_never_changes() {
		let (vp, config, mut attractor) = setup();
		let mut rng = SmallRng::seed_from_u64(8);
		let mut store = ParticleStore::seed(&vp, &config, &mut rng);
		let identity: Vec<bool> = store.particles.iter().map(Particle::is_ring).collect();
		let mut batches = Batches::default();

		for frame in 0..300 {
			let pointer = Pointer {
				x: 50.0,
				y: 50.0,
				active: frame % 50 < 25,
			};
			attractor.update(&pointer);
			step(&mut store, &attractor, &vp, &config, &mut rng, &mut batches);
		}

		let after: Vec<bool> = store.particles.iter().map(Particle::is_ring).collect();
		assert_eq!(identity, after);
	}

	#[test]
	fn test_background_stays_inside_canvas() {
		let (vp, config, mut attractor) = setup();
		let mut rng = SmallRng::seed_from_u64(13);
		let mut store = ParticleStore::seed(&vp, &config, &mut rng);
		let mut batches = Batches::default();

		for _ in 0..500 {
			attractor.update(&Pointer::default());
			step(&mut store, &attractor, &vp, &config, &mut rng, &mut batches);
			for p in store.particles.iter().filter(|p| !p.is_ring()) {
				assert!((0.0..=vp.width).contains(&p.x));
				assert!((0.0..=vp.height).contains(&p.y));
			}
		}
	}
}
