//! Black hole particle backdrop.
//!
//! Renders a 2D particle simulation on an HTML canvas with:
//! - A smoothed attractor that follows the pointer or floats on an idle path
//! - A ring of particles bound to the attractor at fixed polar offsets
//! - A drifting, edge-wrapping background field lensed around the attractor
//! - Resolution capping so wide screens do not simulate at full size
//!
//! # Example
//!
//! ```ignore
//! use event_horizon::BlackHoleCanvas;
//!
//! let dark = RwSignal::new(true);
//!
//! view! {
//!     <section style="position: relative; height: 100vh;">
//!         <BlackHoleCanvas dark=dark />
//!     </section>
//! }
//! ```

pub mod attractor;
mod component;
pub mod config;
pub mod particles;
pub mod physics;
pub mod render;
pub mod scale;
pub mod scheduler;
pub mod state;
pub mod theme;

pub use component::BlackHoleCanvas;
pub use config::SimConfig;
pub use state::BlackHoleState;
pub use theme::Theme;
