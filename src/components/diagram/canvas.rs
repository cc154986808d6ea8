use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render::Surface;
use super::types::{Color, Point, Rect};

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl<'a> CanvasSurface<'a> {
	pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
		Self { ctx, width, height }
	}
}

impl Surface for CanvasSurface<'_> {
	type Error = JsValue;

	fn clear(&mut self, color: Color) -> Result<(), JsValue> {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
		Ok(())
	}

	fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) -> Result<(), JsValue> {
		let r = radius.min(rect.size.width / 2.0).min(rect.size.height / 2.0);
		let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
		let ctx = self.ctx;
		ctx.begin_path();
		ctx.move_to(l + r, t);
		ctx.arc_to(rt, t, rt, b, r)?;
		ctx.arc_to(rt, b, l, b, r)?;
		ctx.arc_to(l, b, l, t, r)?;
		ctx.arc_to(l, t, rt, t, r)?;
		ctx.close_path();
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();
		Ok(())
	}

	fn circle(&mut self, center: Point, radius: f64, fill: Color, outline: Color) -> Result<(), JsValue> {
		let ctx = self.ctx;
		ctx.begin_path();
		ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&outline.to_css());
		ctx.set_line_width(1.0);
		ctx.stroke();
		Ok(())
	}

	fn line(&mut self, from: Point, to: Point, color: Color, width: f64, dash: &[f64]) -> Result<(), JsValue> {
		let ctx = self.ctx;
		let pattern: js_sys::Array = dash.iter().map(|&d| JsValue::from_f64(d)).collect();
		ctx.set_line_dash(&pattern)?;
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
		ctx.set_line_dash(&js_sys::Array::new())
	}
}

/// Canvas-space position of a client-space mouse coordinate.
pub fn to_canvas_space(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

/// The canvas's computed CSS `color`, used as the theme foreground.
pub fn foreground_color(window: &Window, canvas: &HtmlCanvasElement) -> Result<Option<Color>, JsValue> {
	let Some(style) = window.get_computed_style(canvas)? else {
		return Ok(None);
	};
	Ok(Color::parse_css(&style.get_property_value("color")?))
}

pub fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) -> Result<(), JsValue> {
	canvas.style().set_property("cursor", cursor)
}
