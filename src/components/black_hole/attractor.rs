//! The moving "black hole" the ring orbits.
//!
//! The attractor never jumps: each frame it closes a fixed fraction of the
//! gap to its target, whether that target is the pointer or the idle float
//! path. Toggling between the two only moves the target.

use super::config::SimConfig;
use super::scale::Viewport;

/// Pointer position in internal space, plus whether it currently steers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
	pub active: bool,
}

/// Smoothed attractor state for one seed.
#[derive(Clone, Debug)]
pub struct Attractor {
	pub x: f64,
	pub y: f64,
	pub is_active: bool,
	/// Idle clock, advanced once per frame.
	pub time: f64,
	center: (f64, f64),
	float_amp: f64,
	smoothing: f64,
	time_step: f64,
}

impl Attractor {
	/// A resting attractor at the viewport's geometric center.
	pub fn new(viewport: &Viewport, config: &SimConfig) -> Self {
		let center = viewport.center();
		let float_amp = viewport.to_internal(if viewport.is_mobile(config.mobile_breakpoint) {
			config.float_amp_mobile
		} else {
			config.float_amp_desktop
		});

		Self {
			x: center.0,
			y: center.1,
			is_active: false,
			time: 0.0,
			center,
			float_amp,
			smoothing: config.smoothing,
			time_step: config.idle_time_step,
		}
	}

	/// Idle Lissajous path around the seed center.
	pub fn idle_target(&self) -> (f64, f64) {
		let (cx, cy) = self.center;
		(
			cx + (self.time * 0.5).cos() * self.float_amp,
			cy + (self.time * 1.0).sin() * self.float_amp * 0.5,
		)
	}

	/// Where the attractor is heading this frame.
	pub fn target(&self, pointer: &Pointer) -> (f64, f64) {
		if pointer.active {
			(pointer.x, pointer.y)
		} else {
			self.idle_target()
		}
	}

	/// Advance one frame toward the current target.
	pub fn update(&mut self, pointer: &Pointer) {
		self.time += self.time_step;
		self.is_active = pointer.active;

		let (tx, ty) = self.target(pointer);
		self.x += (tx - self.x) * self.smoothing;
		self.y += (ty - self.y) * self.smoothing;
	}

	pub fn position(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		((x - self.x).powi(2) + (y - self.y).powi(2)).sqrt()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn attractor() -> Attractor {
		Attractor::new(&Viewport::new(800.0, 600.0, 1920.0), &SimConfig::default())
	}

	#[test]
	fn test_starts_at_center_idle() {
		let a = attractor();
		assert_eq!(a.position(), (400.0, 300.0));
		assert!(!a.is_active);
	}

	#[test]
	fn test_converges_to_held_pointer() {
		let mut a = attractor();
		a.x = 0.0;
		a.y = 0.0;
		let pointer = Pointer {
			x: 400.0,
			y: 300.0,
			active: true,
		};

		let mut last_gap = a.distance_to(400.0, 300.0);
		for _ in 0..200 {
			a.update(&pointer);
			let gap = a.distance_to(400.0, 300.0);
			assert!(gap <= last_gap);
			last_gap = gap;
		}
		assert!(last_gap < 1.0, "gap {last_gap}");
		assert!(a.is_active);
	}

	#[test]
	fn test_pointer_leave_switches_target_without_jump() {
		let mut a = attractor();
		let mut pointer = Pointer {
			x: 700.0,
			y: 500.0,
			active: true,
		};
		for _ in 0..30 {
			a.update(&pointer);
		}

		pointer.active = false;
		let before = a.position();
		let expected_step = {
			let (tx, ty) = Attractor {
				time: a.time + a.time_step,
				..a.clone()
			}
			.idle_target();
			((tx - before.0).powi(2) + (ty - before.1).powi(2)).sqrt() * a.smoothing
		};
		a.update(&pointer);

		assert!(!a.is_active);
		let moved = a.distance_to(before.0, before.1);
		assert!((moved - expected_step).abs() < 1e-9);
	}

	#[test]
	fn test_idle_path_stays_within_amplitude() {
		let mut a = attractor();
		let idle = Pointer::default();
		for _ in 0..2000 {
			a.update(&idle);
			let (tx, ty) = a.idle_target();
			assert!((tx - 400.0).abs() <= 50.0 + 1e-9);
			assert!((ty - 300.0).abs() <= 25.0 + 1e-9);
		}
	}

	#[test]
	fn test_mobile_amplitude_is_smaller() {
		let config = SimConfig::default();
		let mut a = Attractor::new(&Viewport::new(390.0, 844.0, 1920.0), &config);
		a.time = 0.0;
		let (tx, _) = a.idle_target();
		assert_eq!(tx - 195.0, config.float_amp_mobile);
	}
}
