//! Leptos component wrapping the black hole canvas.
//!
//! The component creates a container `div` with the canvas inside it and wires
//! up pointer handlers on the container, a window resize listener, and an
//! `IntersectionObserver` for visibility. An animation loop runs via
//! `requestAnimationFrame`, driven by a [`FrameLoop`] so that it pauses while
//! off-screen and is cancelled on unmount.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, IntersectionObserver,
	IntersectionObserverEntry, PointerEvent, Window,
};

use super::config::SimConfig;
use super::scale::{ResizeFilter, Viewport};
use super::scheduler::{AnimationFrames, FrameCallback, FrameLoop, Phase};
use super::state::BlackHoleState;
use super::theme::Theme;

/// Simulation plus the browser handles it draws through.
struct HeroContext {
	state: BlackHoleState,
	frames: FrameLoop<AnimationFrames>,
	resize: ResizeFilter,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl HeroContext {
	fn mount(
		viewport: Viewport,
		config: SimConfig,
		frames: FrameLoop<AnimationFrames>,
		canvas: HtmlCanvasElement,
		ctx: CanvasRenderingContext2d,
	) -> Self {
		let mut hero = Self {
			state: BlackHoleState::new(viewport, config),
			frames,
			resize: ResizeFilter::new(viewport),
			canvas,
			ctx,
		};
		hero.frames.begin_seed();
		hero.apply_viewport(viewport);
		hero
	}

	/// Container size changed. Re-seeds only when the width differs.
	fn resize(&mut self, css_width: f64, css_height: f64) {
		let max = self.state.config.max_internal_width;
		let Some(viewport) = self.resize.accept(css_width, css_height, max) else {
			debug!(
				"event-horizon: ignoring height-only resize to {}x{}",
				css_width, css_height
			);
			return;
		};
		self.frames.begin_seed();
		self.state.reseed(viewport);
		self.apply_viewport(viewport);
	}

	fn apply_viewport(&mut self, viewport: Viewport) {
		self.canvas.set_width(viewport.width as u32);
		self.canvas.set_height(viewport.height as u32);
		info!(
			"event-horizon: seeded {} ring / {} background particles at {}x{} (scale {:.3})",
			self.state.store.ring_count(),
			self.state.store.background_count(),
			viewport.width,
			viewport.height,
			viewport.scale
		);
		self.frames.finish_seed(!viewport.is_empty());
		if self.frames.phase() == Phase::Paused {
			debug!("event-horizon: paused (zero-area or hidden)");
		}
	}

	fn frame(&mut self, theme: Theme) {
		if self.frames.on_frame() {
			self.state.frame(&mut self.ctx, theme);
		}
	}

	fn set_visible(&mut self, visible: bool) {
		let before = self.frames.phase();
		self.frames.set_visible(visible);
		let after = self.frames.phase();
		if before != after {
			debug!("event-horizon: {:?} -> {:?}", before, after);
		}
	}
}

/// Listener handles that must be released on unmount.
struct Mounted {
	window: Window,
	context: Rc<RefCell<Option<HeroContext>>>,
	animate: FrameCallback,
	on_resize: Closure<dyn FnMut()>,
	visibility: Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>,
}

impl Mounted {
	fn teardown(self) {
		if let Some(mut hero) = self.context.borrow_mut().take() {
			hero.frames.stop();
		}
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		if let Some((observer, _callback)) = &self.visibility {
			observer.disconnect();
		}
		// Breaks the closure's reference to its own slot.
		self.animate.borrow_mut().take();
		info!("event-horizon: torn down");
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn measure(container: &Element) -> (f64, f64) {
	(
		container.client_width() as f64,
		container.client_height() as f64,
	)
}

fn observe_visibility(
	container: &Element,
	context: Rc<RefCell<Option<HeroContext>>>,
) -> Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)> {
	let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
		let visible = entries
			.iter()
			.filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
			.last()
			.map(|entry| entry.is_intersecting());
		if let (Some(visible), Some(hero)) = (visible, context.borrow_mut().as_mut()) {
			hero.set_visible(visible);
		}
	});
	let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref()).ok()?;
	observer.observe(container);
	Some((observer, callback))
}

/// Renders the black hole backdrop into a canvas that fills its parent.
///
/// The parent should be positioned; the component's container is absolutely
/// positioned to cover it. `dark` is read every frame, so a theme toggle shows
/// up on the next frame without re-seeding. `config` defaults to the compiled
/// constants.
#[component]
pub fn BlackHoleCanvas(
	#[prop(into)] dark: Signal<bool>,
	#[prop(optional)] config: Option<SimConfig>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<HeroContext>>> = Rc::new(RefCell::new(None));
	let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let (context_init, mounted_init) = (context.clone(), mounted.clone());

	Effect::new(move |_| {
		let (Some(container), Some(canvas)) = (container_ref.get(), canvas_ref.get()) else {
			return;
		};
		if mounted_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("event-horizon: no window, not starting");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("event-horizon: 2d canvas context unavailable");
			return;
		};
		let container: Element = container.into();

		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let frames = FrameLoop::new(AnimationFrames::new(window.clone(), animate.clone()));
		let (css_width, css_height) = measure(&container);
		let viewport = Viewport::new(css_width, css_height, config.max_internal_width);
		info!(
			"event-horizon: mounting at {}x{} css px",
			css_width, css_height
		);

		// The first seed requests a frame, so the callback must exist first.
		let context_anim = context_init.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(hero) = context_anim.borrow_mut().as_mut() {
				let dark = dark.try_get_untracked().unwrap_or(true);
				hero.frame(Theme::from_dark_flag(dark));
			}
		}));
		*context_init.borrow_mut() = Some(HeroContext::mount(
			viewport,
			config.clone(),
			frames,
			canvas,
			ctx,
		));

		let (context_resize, container_resize) = (context_init.clone(), container.clone());
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			let (w, h) = measure(&container_resize);
			if let Some(hero) = context_resize.borrow_mut().as_mut() {
				hero.resize(w, h);
			}
		});
		if window
			.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("event-horizon: could not listen for window resize");
		}

		let visibility = observe_visibility(&container, context_init.clone());
		if visibility.is_none() {
			warn!("event-horizon: IntersectionObserver unavailable, running unconditionally");
		}

		*mounted_init.borrow_mut() = Some(Mounted {
			window,
			context: context_init.clone(),
			animate,
			on_resize,
			visibility,
		});
	});

	let teardown = StoredValue::new_local(mounted);
	on_cleanup(move || {
		let _ = teardown.try_with_value(|mounted| {
			if let Some(mounted) = mounted.borrow_mut().take() {
				mounted.teardown();
			}
		});
	});

	let context_move = context.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let rect = container.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(hero) = context_move.borrow_mut().as_mut() {
			hero.state.pointer_move(x, y);
		}
	};

	let context_leave = context;
	let on_pointerleave = move |_: PointerEvent| {
		if let Some(hero) = context_leave.borrow_mut().as_mut() {
			hero.state.pointer_leave();
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="black-hole"
			on:pointermove=on_pointermove
			on:pointerleave=on_pointerleave
			style="position: absolute; inset: 0; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="black-hole-canvas"
				style="display: block; width: 100%; height: 100%;"
			/>
		</div>
	}
}
