//! Frame scheduling with an explicit lifecycle.
//!
//! [`FrameLoop`] decides when the next animation frame is requested. The
//! browser side is abstracted behind [`FrameRequester`] so the state machine
//! can be driven without a window:
//!
//! ```text
//! Unmounted -> Seeding -> Running <-> Paused
//!                 ^          |          |
//!                 +----------+----------+     (dimension change)
//!                            any -> Teardown
//! ```
//!
//! At most one frame request is ever pending, and teardown cancels it exactly
//! once.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Something that can request and cancel a single future frame callback.
pub trait FrameRequester {
	type Handle: Copy;

	/// Ask for the frame callback to run once. `None` if the request failed.
	fn request(&mut self) -> Option<Self::Handle>;
	fn cancel(&mut self, handle: Self::Handle);
}

/// Lifecycle phase of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Unmounted,
	Seeding,
	Running,
	Paused,
	Teardown,
}

/// Start/pause/resume/stop control surface over a [`FrameRequester`].
pub struct FrameLoop<R: FrameRequester> {
	requester: R,
	pending: Option<R::Handle>,
	phase: Phase,
	visible: bool,
	has_area: bool,
}

impl<R: FrameRequester> FrameLoop<R> {
	pub fn new(requester: R) -> Self {
		Self {
			requester,
			pending: None,
			phase: Phase::Unmounted,
			visible: true,
			has_area: false,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// A fresh particle store is being built.
	pub fn begin_seed(&mut self) {
		if self.phase != Phase::Teardown {
			self.phase = Phase::Seeding;
		}
	}

	/// Seeding finished; `has_area` is false for a zero-area viewport.
	pub fn finish_seed(&mut self, has_area: bool) {
		if self.phase != Phase::Seeding {
			return;
		}
		self.has_area = has_area;
		self.settle();
	}

	/// Visibility of the hosting container changed.
	pub fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
		if matches!(self.phase, Phase::Running | Phase::Paused) {
			self.settle();
		}
	}

	/// Called at the top of each frame callback. Returns whether a simulation
	/// step should run for this frame; the next frame is already requested
	/// when it does.
	pub fn on_frame(&mut self) -> bool {
		self.pending = None;
		if self.phase != Phase::Running {
			return false;
		}
		self.schedule();
		true
	}

	/// Cancel the pending frame and refuse any further scheduling.
	pub fn stop(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.requester.cancel(handle);
		}
		self.phase = Phase::Teardown;
	}

	fn settle(&mut self) {
		if self.visible && self.has_area {
			self.phase = Phase::Running;
			self.schedule();
		} else {
			self.phase = Phase::Paused;
			if let Some(handle) = self.pending.take() {
				self.requester.cancel(handle);
			}
		}
	}

	fn schedule(&mut self) {
		if self.pending.is_none() {
			self.pending = self.requester.request();
		}
	}
}

/// Shared slot for the per-frame closure; the closure reschedules itself
/// through it.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` on the browser window.
pub struct AnimationFrames {
	window: Window,
	callback: FrameCallback,
}

impl AnimationFrames {
	pub fn new(window: Window, callback: FrameCallback) -> Self {
		Self { window, callback }
	}
}

impl FrameRequester for AnimationFrames {
	type Handle = i32;

	fn request(&mut self) -> Option<i32> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}
