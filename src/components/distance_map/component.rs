use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render;
use super::state::MapState;
use crate::layout::{DEFAULT_HEIGHT, DEFAULT_WIDTH, LayoutConfig, MemorySource};

/// Draws the solved layout of `source` on a canvas.
///
/// Every change of `source` or `config`, and every window resize in
/// fullscreen mode, recomputes the layout from scratch.
#[component]
pub fn DistanceMapCanvas(
	#[prop(into)] source: Signal<MemorySource>,
	#[prop(into)] config: Signal<LayoutConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window, skipping layout");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};

		let (source, config) = (source.get(), config.get());
		let size = move |window: &Window, canvas: &HtmlCanvasElement| {
			if fullscreen {
				window_size(window)
			} else {
				let parent = canvas.parent_element();
				(
					width.unwrap_or_else(|| {
						parent
							.as_ref()
							.map(|p| p.client_width() as f64)
							.unwrap_or(DEFAULT_WIDTH)
					}),
					height.unwrap_or_else(|| {
						parent
							.as_ref()
							.map(|p| p.client_height() as f64)
							.unwrap_or(DEFAULT_HEIGHT)
					}),
				)
			}
		};
		let draw = Rc::new(move |window: &Window, canvas: &HtmlCanvasElement| {
			let (w, h) = size(window, canvas);
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			let state = MapState::new(&source, &config, w, h);
			debug!("drew {} nodes on {w}x{h}", state.graph.nodes.len());
			render::render(&state, &ctx);
		});
		draw(&window, &canvas);

		if fullscreen {
			let previous = resize_cb.borrow_mut().take();
			if let Some(cb) = previous {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			let (draw_resize, canvas_resize) = (draw.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				if let Some(win) = web_sys::window() {
					draw_resize(&win, &canvas_resize);
				}
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			*resize_cb.borrow_mut() = Some(cb);
		}
	});

	view! { <canvas node_ref=canvas_ref class="distance-map-canvas" style="display: block;" /> }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn window_size(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dimension(window.inner_width(), DEFAULT_WIDTH),
		dimension(window.inner_height(), DEFAULT_HEIGHT),
	)
}
