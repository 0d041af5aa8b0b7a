//! Resolution capping and CSS-to-internal coordinate scaling.
//!
//! # Coordinate Spaces
//!
//! - **CSS space**: the container's layout size, and where pointer events
//!   arrive.
//! - **Internal space**: the canvas backing store. Its width is capped at
//!   `max_internal_width`, so on very wide screens the browser upsamples a
//!   smaller bitmap instead of the simulation running at 4K.
//!
//! Every length that enters the simulation (ring radius, float amplitude,
//! pointer position) goes through [`Viewport::to_internal`] exactly once.

/// Container geometry resolved into internal render resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Container width in CSS pixels.
	pub css_width: f64,
	/// Container height in CSS pixels.
	pub css_height: f64,
	/// CSS-to-internal factor, never above 1.
	pub scale: f64,
	/// Backing store width.
	pub width: f64,
	/// Backing store height.
	pub height: f64,
}

impl Viewport {
	/// Resolve a container size, capping the internal width.
	pub fn new(css_width: f64, css_height: f64, max_internal_width: f64) -> Self {
		let (css_width, css_height) = (css_width.max(0.0), css_height.max(0.0));
		let scale = if css_width > 0.0 {
			(max_internal_width / css_width).min(1.0)
		} else {
			1.0
		};

		Self {
			css_width,
			css_height,
			scale,
			width: (css_width * scale).floor(),
			height: (css_height * scale).floor(),
		}
	}

	/// Convert a CSS-space length or coordinate into internal space.
	pub fn to_internal(&self, value: f64) -> f64 {
		value * self.scale
	}

	/// Whether there is nothing to simulate or draw.
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}

	/// Mobile layouts use a smaller ring and a calmer idle float.
	pub fn is_mobile(&self, breakpoint: f64) -> bool {
		self.css_width < breakpoint
	}

	/// Geometric center in internal space.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// Decides which container size updates warrant a fresh seed.
///
/// Only the logical width is compared. On mobile, showing or hiding the
/// on-screen keyboard or the browser toolbar changes the height alone, and
/// re-seeding on those would visibly reset the ring.
#[derive(Clone, Debug, Default)]
pub struct ResizeFilter {
	last: Option<Viewport>,
}

impl ResizeFilter {
	/// A filter that already knows the viewport seeded at mount.
	pub fn new(initial: Viewport) -> Self {
		Self {
			last: Some(initial),
		}
	}

	/// Returns the new viewport when it should replace the current one.
	///
	/// A width-stable update is still accepted when the last accepted viewport
	/// had zero area; otherwise a container that mounts collapsed would never
	/// start.
	pub fn accept(
		&mut self,
		css_width: f64,
		css_height: f64,
		max_internal_width: f64,
	) -> Option<Viewport> {
		let next = Viewport::new(css_width, css_height, max_internal_width);
		let unchanged = self.last.is_some_and(|last| {
			last.css_width == next.css_width && (!last.is_empty() || next.is_empty())
		});
		if unchanged {
			return None;
		}
		self.last = Some(next);
		Some(next)
	}

	/// The most recently accepted viewport.
	pub fn current(&self) -> Option<Viewport> {
		self.last
	}
}
