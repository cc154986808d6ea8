use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::canvas::{self, CanvasSurface};
use super::config::DiagramConfig;
use super::model::DiagramModel;
use super::render::{self, Theme};
use super::state::{DiagramState, Reaction};
use super::types::{DiagramSeed, Point};

type Shared<T> = Rc<RefCell<Option<T>>>;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("no 2d context"))?
		.dyn_into()
		.map_err(JsValue::from)
}

fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
	let dim = |v: JsValue| v.as_f64().ok_or_else(|| JsValue::from_str("non-numeric viewport size"));
	Ok((dim(window.inner_width()?)?, dim(window.inner_height()?)?))
}

fn apply(canvas: &HtmlCanvasElement, dirty: &Cell<bool>, reaction: Reaction) {
	if reaction.redraw {
		dirty.set(true);
	}
	if let Some(cursor) = reaction.cursor {
		if let Err(err) = canvas::set_cursor(canvas, cursor.css()) {
			warn!("could not set cursor: {err:?}");
		}
	}
}

/// Full-window (or parent-sized) editing canvas.
///
/// Double-click places a node, dragging a node's body moves it, and dragging from
/// its center dot onto another node toggles a link between the two.
#[component]
pub fn DiagramCanvas(
	#[prop(into)] data: Signal<DiagramSeed>,
	#[prop(optional)] config: Option<DiagramConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<DiagramState> = Rc::new(RefCell::new(None));
	let dirty = Rc::new(Cell::new(true));
	let size = Rc::new(Cell::new((0.0, 0.0)));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let (state_init, dirty_init, size_init, animate_init, resize_cb_init) = (
		state.clone(),
		dirty.clone(),
		size.clone(),
		animate.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window available");
			return;
		};

		let (w, h) = if fullscreen {
			match viewport_size(&window) {
				Ok(dims) => dims,
				Err(err) => {
					error!("could not read viewport size: {err:?}");
					return;
				}
			}
		} else {
			let parent = |f: fn(&web_sys::Element) -> i32, fallback| {
				canvas.parent_element().map(|p| f(&p) as f64).unwrap_or(fallback)
			};
			(
				width.unwrap_or_else(|| parent(web_sys::Element::client_width, 800.0)),
				height.unwrap_or_else(|| parent(web_sys::Element::client_height, 600.0)),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		size_init.set((w, h));

		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				error!("could not acquire canvas context: {err:?}");
				return;
			}
		};
		let theme = match canvas::foreground_color(&window, &canvas) {
			Ok(Some(foreground)) => Theme { foreground },
			Ok(None) => Theme::default(),
			Err(err) => {
				warn!("could not read theme color: {err:?}");
				Theme::default()
			}
		};

		let mut model = DiagramModel::from_seed(config.clone(), &data.get());
		let dirty_model = dirty_init.clone();
		model.subscribe(move || dirty_model.set(true));
		info!("diagram canvas ready with {} nodes", model.len());
		*state_init.borrow_mut() = Some(DiagramState::new(model));
		dirty_init.set(true);

		if fullscreen {
			let (size_resize, dirty_resize, canvas_resize) =
				(size_init.clone(), dirty_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				match viewport_size(&win) {
					Ok((nw, nh)) => {
						canvas_resize.set_width(nw as u32);
						canvas_resize.set_height(nh as u32);
						size_resize.set((nw, nh));
						dirty_resize.set(true);
					}
					Err(err) => warn!("could not read viewport size: {err:?}"),
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, dirty_anim, size_anim, animate_inner) = (
			state_init.clone(),
			dirty_init.clone(),
			size_init.clone(),
			animate_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if dirty_anim.replace(false) {
				if let Some(ref s) = *state_anim.borrow() {
					let (w, h) = size_anim.get();
					if let Err(err) = render::paint(s, theme, &mut CanvasSurface::new(&ctx, w, h)) {
						error!("paint failed: {err:?}");
					}
				}
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Every pointer handler follows the same shape: map to canvas space, feed the
	// controller, then hand its reaction to `apply`.
	let handler = |f: fn(&mut DiagramState, Point) -> Reaction| {
		let (state, dirty, canvas_ref) = (state.clone(), dirty.clone(), canvas_ref);
		move |ev: MouseEvent| {
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			let pos = canvas::to_canvas_space(&canvas, ev.client_x(), ev.client_y());
			let reaction = match *state.borrow_mut() {
				Some(ref mut s) => f(s, pos),
				None => return,
			};
			apply(&canvas, &dirty, reaction);
		}
	};
	let on_mousedown = handler(DiagramState::pointer_down);
	let on_mousemove = handler(DiagramState::pointer_move);
	let on_mouseup = handler(DiagramState::pointer_up);
	let on_dblclick = handler(DiagramState::double_click);
	let on_mouseleave = handler(|s, _| s.pointer_leave());

	view! {
		<canvas
			node_ref=canvas_ref
			class="diagram-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:dblclick=on_dblclick
			on:mouseleave=on_mouseleave
			style="display: block; cursor: default;"
		/>
	}
}
