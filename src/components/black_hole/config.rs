//! Simulation constants and the embeddable configuration block.
//!
//! The constants are the compile-time defaults. [`SimConfig`] bundles them so
//! tests and hosts can tweak a copy, and it can be filled from a JSON block
//! embedded in the page (missing fields keep their defaults).

use serde::Deserialize;
use serde::de::Error as _;

/// Number of particles created per seed.
pub const PARTICLE_COUNT: usize = 1500;
/// Probability that a seeded particle is bound to the ring.
pub const RING_PROBABILITY: f64 = 0.40;
/// Ring radius in CSS pixels at desktop widths.
pub const RING_RADIUS_DESKTOP: f64 = 300.0;
/// Ring radius in CSS pixels below [`MOBILE_BREAKPOINT`].
pub const RING_RADIUS_MOBILE: f64 = 150.0;
/// CSS width below which mobile radii and amplitudes apply.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Maximum width of the canvas backing store.
pub const MAX_INTERNAL_WIDTH: f64 = 1920.0;
/// Maximum distance (internal px) a ring particle is seeded from its slot.
pub const SEED_JITTER: f64 = 10.0;

/// Per-frame velocity retention for background particles.
pub const BACKGROUND_DAMPING: f64 = 0.96;
/// Per-frame velocity retention for ring particles. Must stay below
/// [`BACKGROUND_DAMPING`] so the ring settles instead of drifting.
pub const RING_DAMPING: f64 = 0.80;
/// Fraction of the gap to its ring slot added to a ring particle's velocity.
pub const RING_SPRING: f64 = 0.01;
/// Full width of the uniform random acceleration applied each frame.
pub const VELOCITY_NOISE: f64 = 0.15;
/// Full width of the uniform initial velocity range.
pub const INITIAL_SPEED: f64 = 1.5;
/// Smallest particle edge length.
pub const SIZE_MIN: f64 = 0.5;
/// Largest particle edge length (exclusive).
pub const SIZE_MAX: f64 = 2.0;

/// Multiplier on the ring radius in the lensing displacement.
pub const LENS_STRENGTH: f64 = 60.0;
/// Background particles closer than this to the attractor are not drawn.
pub const SINGULARITY_RADIUS: f64 = 20.0;

/// Fraction of the remaining gap the attractor closes each frame.
pub const SMOOTHING: f64 = 0.05;
/// Idle clock increment per frame.
pub const IDLE_TIME_STEP: f64 = 0.01;
/// Idle float amplitude in CSS pixels at desktop widths.
pub const FLOAT_AMP_DESKTOP: f64 = 50.0;
/// Idle float amplitude in CSS pixels below [`MOBILE_BREAKPOINT`].
pub const FLOAT_AMP_MOBILE: f64 = 20.0;

/// Tunable simulation parameters.
///
/// Field names double as the keys of the JSON override block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
	/// Particles created per seed.
	pub particle_count: usize,
	/// Chance in `[0, 1]` that a particle joins the ring.
	pub ring_probability: f64,
	/// Ring radius in CSS px at desktop widths.
	pub ring_radius_desktop: f64,
	/// Ring radius in CSS px below `mobile_breakpoint`.
	pub ring_radius_mobile: f64,
	/// CSS width below which the mobile radius and amplitude apply.
	pub mobile_breakpoint: f64,
	/// Cap on the canvas backing store width. Must be positive.
	pub max_internal_width: f64,
	/// Maximum seeded offset of a ring particle from its slot.
	pub seed_jitter: f64,
	/// Per-frame velocity retention of background particles.
	pub background_damping: f64,
	/// Per-frame velocity retention of ring particles.
	pub ring_damping: f64,
	/// Pull of a ring particle toward its slot.
	pub ring_spring: f64,
	/// Full width of the per-frame random acceleration. Not negative.
	pub velocity_noise: f64,
	/// Full width of the seeded velocity range.
	pub initial_speed: f64,
	/// Smallest particle size. Must not exceed `size_max`.
	pub size_min: f64,
	pub size_max: f64,
	/// Lensing multiplier on the ring radius.
	pub lens_strength: f64,
	/// Background particles this close to the attractor are hidden.
	pub singularity_radius: f64,
	/// Fraction of the gap the attractor closes per frame, in `(0, 1]`.
	pub smoothing: f64,
	pub idle_time_step: f64,
	/// Idle float amplitude in CSS px at desktop widths.
	pub float_amp_desktop: f64,
	pub float_amp_mobile: f64,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			particle_count: PARTICLE_COUNT,
			ring_probability: RING_PROBABILITY,
			ring_radius_desktop: RING_RADIUS_DESKTOP,
			ring_radius_mobile: RING_RADIUS_MOBILE,
			mobile_breakpoint: MOBILE_BREAKPOINT,
			max_internal_width: MAX_INTERNAL_WIDTH,
			seed_jitter: SEED_JITTER,
			background_damping: BACKGROUND_DAMPING,
			ring_damping: RING_DAMPING,
			ring_spring: RING_SPRING,
			velocity_noise: VELOCITY_NOISE,
			initial_speed: INITIAL_SPEED,
			size_min: SIZE_MIN,
			size_max: SIZE_MAX,
			lens_strength: LENS_STRENGTH,
			singularity_radius: SINGULARITY_RADIUS,
			smoothing: SMOOTHING,
			idle_time_step: IDLE_TIME_STEP,
			float_amp_desktop: FLOAT_AMP_DESKTOP,
			float_amp_mobile: FLOAT_AMP_MOBILE,
		}
	}
}

impl SimConfig {
	/// Parse a (possibly partial) JSON override block.
	///
	/// Values that parse but would break the simulation (NaN, negative noise,
	/// a probability outside `[0, 1]`, ...) are rejected so the caller falls
	/// back to the defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let config: Self = serde_json::from_str(json)?;
		config.validate().map_err(serde_json::Error::custom)?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), String> {
		let fields = [
			("ring_probability", self.ring_probability),
			("ring_radius_desktop", self.ring_radius_desktop),
			("ring_radius_mobile", self.ring_radius_mobile),
			("mobile_breakpoint", self.mobile_breakpoint),
			("max_internal_width", self.max_internal_width),
			("seed_jitter", self.seed_jitter),
			("background_damping", self.background_damping),
			("ring_damping", self.ring_damping),
			("ring_spring", self.ring_spring),
			("velocity_noise", self.velocity_noise),
			("initial_speed", self.initial_speed),
			("size_min", self.size_min),
			("size_max", self.size_max),
			("lens_strength", self.lens_strength),
			("singularity_radius", self.singularity_radius),
			("smoothing", self.smoothing),
			("idle_time_step", self.idle_time_step),
			("float_amp_desktop", self.float_amp_desktop),
			("float_amp_mobile", self.float_amp_mobile),
		];
		if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
			return Err(format!("{name} must be finite"));
		}

		if self.velocity_noise < 0.0 {
			return Err("velocity_noise must not be negative".into());
		}
		if !(0.0..=1.0).contains(&self.ring_probability) {
			return Err("ring_probability must be within [0, 1]".into());
		}
		if self.size_min > self.size_max {
			return Err("size_min must not exceed size_max".into());
		}
		if self.max_internal_width <= 0.0 {
			return Err("max_internal_width must be positive".into());
		}
		if self.smoothing <= 0.0 || self.smoothing > 1.0 {
			return Err("smoothing must be within (0, 1]".into());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ring_settles_faster_than_background() {
		let config = SimConfig::default();
		assert!(config.smoothing < config.ring_damping);
		assert!(config.ring_damping < config.background_damping);
		assert!(config.background_damping < 1.0);
	}

	#[test]
	fn test_partial_json_keeps_defaults() {
		let config = SimConfig::from_json(r#"{ "particle_count": 600, "lens_strength": 40.0 }"#)
			.unwrap();
		assert_eq!(config.particle_count, 600);
		assert_eq!(config.lens_strength, 40.0);
		assert_eq!(config.ring_probability, RING_PROBABILITY);
		assert_eq!(config.max_internal_width, MAX_INTERNAL_WIDTH);
	}

	#[test]
	fn test_defaults_pass_validation() {
		assert!(SimConfig::default().validate().is_ok());
	}

	#[test]
	fn test_negative_noise_is_rejected() {
		assert!(SimConfig::from_json(r#"{ "velocity_noise": -0.2 }"#).is_err());
		assert!(SimConfig::from_json(r#"{ "velocity_noise": 0.0 }"#).is_ok());
	}

	#[test]
	fn test_ring_probability_out_of_range_is_rejected() {
		assert!(SimConfig::from_json(r#"{ "ring_probability": 1.5 }"#).is_err());
		assert!(SimConfig::from_json(r#"{ "ring_probability": -0.1 }"#).is_err());
		assert!(SimConfig::from_json(r#"{ "ring_probability": 1.0 }"#).is_ok());
	}

	#[test]
	fn test_non_finite_value_is_rejected() {
		// JSON has no NaN literal; an overflowing number must still fail.
		assert!(SimConfig::from_json(r#"{ "lens_strength": 1e999 }"#).is_err());

		let config = SimConfig {
			ring_probability: f64::NAN,
			..SimConfig::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_inverted_size_range_is_rejected() {
		assert!(SimConfig::from_json(r#"{ "size_min": 3.0, "size_max": 2.0 }"#).is_err());
	}

	#[test]
	fn test_non_positive_internal_width_is_rejected() {
		assert!(SimConfig::from_json(r#"{ "max_internal_width": 0 }"#).is_err());
		assert!(SimConfig::from_json(r#"{ "max_internal_width": -100 }"#).is_err());
	}

	#[test]
	fn test_smoothing_out_of_range_is_rejected() {
		assert!(SimConfig::from_json(r#"{ "smoothing": 0.0 }"#).is_err());
		assert!(SimConfig::from_json(r#"{ "smoothing": 1.5 }"#).is_err());
		assert!(SimConfig::from_json(r#"{ "smoothing": 1.0 }"#).is_ok());
	}

	#[test]
	fn test_malformed_json_is_an_error() {
		assert!(SimConfig::from_json("{ particle_count: }").is_err());
	}
}
