//! Batch colors for the dark and light page themes.

/// A batch fill color: packed `0xRRGGBB` plus opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub hex: u32,
	pub alpha: f64,
}

impl Color {
	/// Fully opaque.
	pub const fn hex(hex: u32) -> Self {
		Self { hex, alpha: 1.0 }
	}

	pub const fn translucent(hex: u32, alpha: f64) -> Self {
		Self { hex, alpha }
	}

	/// Canvas `fillStyle` string. Opaque colors print as `#rrggbb`.
	pub fn to_css(self) -> String {
		if self.alpha >= 1.0 {
			return format!("#{:06x}", self.hex & 0xff_ffff);
		}
		let [_, r, g, b] = self.hex.to_be_bytes();
		format!("rgba({r},{g},{b},{})", self.alpha)
	}
}

/// Which page theme is showing. Passed into every render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Dark,
	Light,
}

impl Theme {
	pub fn from_dark_flag(dark: bool) -> Self {
		if dark { Theme::Dark } else { Theme::Light }
	}

	pub fn palette(self) -> Palette {
		match self {
			Theme::Dark => Palette::dark(),
			Theme::Light => Palette::light(),
		}
	}
}

/// Fill color for each draw batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub background: Color,
	pub ring_idle: Color,
	pub ring_active: Color,
}

/// Purple accents shown while the pointer steers the attractor. The light
/// theme uses the deeper shade the page's accent text uses.
const ACTIVE_DARK: Color = Color::hex(0xa855f7);
const ACTIVE_LIGHT: Color = Color::hex(0x9333ea);

impl Palette {
	/// Light particles on a black page
	pub const fn dark() -> Self {
		Self {
			background: Color::translucent(0xffffff, 0.3),
			ring_idle: Color::translucent(0xffffff, 0.6),
			ring_active: ACTIVE_DARK,
		}
	}

	/// Dark particles on a white page
	pub const fn light() -> Self {
		Self {
			background: Color::translucent(0x000000, 0.6),
			ring_idle: Color::translucent(0x000000, 0.9),
			ring_active: ACTIVE_LIGHT,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_css_output() {
		assert_eq!(ACTIVE_DARK.to_css(), "#a855f7");
		assert_eq!(ACTIVE_LIGHT.to_css(), "#9333ea");
		assert_eq!(Palette::dark().background.to_css(), "rgba(255,255,255,0.3)");
		assert_eq!(Palette::light().ring_idle.to_css(), "rgba(0,0,0,0.9)");
	}

	#[test]
	fn test_every_batch_color_differs_between_themes() {
		let (dark, light) = (Palette::dark(), Palette::light());
		assert_ne!(dark.background, light.background);
		assert_ne!(dark.ring_idle, light.ring_idle);
		assert_ne!(dark.ring_active, light.ring_active);
	}

	#[test]
	fn test_flag_selects_palette() {
		assert_eq!(Theme::from_dark_flag(true).palette(), Palette::dark());
		assert_eq!(Theme::from_dark_flag(false).palette(), Palette::light());
	}
}
