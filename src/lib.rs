//! event-horizon: black hole particle backdrop for a portfolio hero section.
//!
//! This crate provides a WASM canvas component that renders a ring of particles
//! orbiting a pointer-driven attractor, with a lensed, drifting starfield
//! behind it.

// Enables the `js` backend so `rand` can seed from the browser's crypto API.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::black_hole::{BlackHoleCanvas, BlackHoleState, SimConfig, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("event-horizon: logging initialized");
}

/// Load simulation overrides from a script element with id="event-horizon-config".
/// Expected format: a JSON object with any subset of [`SimConfig`]'s fields.
fn load_config() -> Option<SimConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("event-horizon-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SimConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"event-horizon: loaded config override ({} particles)",
				config.particle_count
			);
			Some(config)
		}
		Err(e) => {
			warn!("event-horizon: failed to parse config override: {}", e);
			None
		}
	}
}

/// Initial theme from the OS-level color scheme preference.
fn prefers_dark() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
		.map(|mq| mq.matches())
		.unwrap_or(true)
}

/// Main application component.
/// Hosts the backdrop in a full-viewport hero section with a theme toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let dark = RwSignal::new(prefers_dark());
	let theme_name = move || if dark.get() { "dark" } else { "light" };

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme_name />
		<Title text="Event Horizon" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero" style="position: relative; width: 100%; height: 100vh;">
			<BlackHoleCanvas dark=dark config=config />
			<button
				class="theme-toggle"
				aria-label="Toggle theme"
				on:click=move |_| dark.update(|d| *d = !*d)
				style="position: absolute; top: 1rem; right: 1rem;"
			>
				{move || if dark.get() { "Light" } else { "Dark" }}
			</button>
		</section>
	}
}
