use super::state::{DiagramState, Gesture};
use super::types::{Color, Point, Rect};

pub const LINK_WIDTH: f64 = 0.4;
pub const RUBBER_BAND_WIDTH: f64 = 1.0;
pub const RUBBER_BAND_DASH: [f64; 2] = [3.0, 10.0];

/// Immediate-mode drawing target the painter needs.
pub trait Surface {
	type Error;

	fn clear(&mut self, color: Color) -> Result<(), Self::Error>;
	fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) -> Result<(), Self::Error>;
	fn circle(
		&mut self,
		center: Point,
		radius: f64,
		fill: Color,
		outline: Color,
	) -> Result<(), Self::Error>;
	/// Straight segment; an empty `dash` means solid.
	fn line(
		&mut self,
		from: Point,
		to: Point,
		color: Color,
		width: f64,
		dash: &[f64],
	) -> Result<(), Self::Error>;
}

/// Theme colors supplied by the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
	pub foreground: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			foreground: Color::BLACK,
		}
	}
}

/// Redraws the whole scene: links, then nodes on top, then the rubber band.
pub fn paint<S: Surface>(state: &DiagramState, theme: Theme, surface: &mut S) -> Result<(), S::Error> {
	let config = state.model.config();
	surface.clear(config.background)?;
	draw_links(state, theme, surface)?;
	draw_nodes(state, theme, surface)?;
	draw_rubber_band(state, theme, surface)
}

fn draw_links<S: Surface>(state: &DiagramState, theme: Theme, surface: &mut S) -> Result<(), S::Error> {
	let model = &state.model;
	for (a, b) in model.edges() {
		let (from, to) = (model.node(a).bounds.center(), model.node(b).bounds.center());
		surface.line(from, to, theme.foreground, LINK_WIDTH, &[])?;
	}
	Ok(())
}

fn draw_nodes<S: Surface>(state: &DiagramState, theme: Theme, surface: &mut S) -> Result<(), S::Error> {
	let config = state.model.config();
	let outline = theme.foreground.darker(config.outline_darken);
	for node in state.model.nodes() {
		let fill = if state.hovered() == Some(node.id) {
			node.color.lighter(config.hover_lighten)
		} else {
			node.color
		};
		surface.fill_rounded_rect(node.bounds, config.rounding, fill)?;
		surface.circle(
			node.bounds.center(),
			config.hit_point_radius,
			theme.foreground,
			outline,
		)?;
	}
	Ok(())
}

fn draw_rubber_band<S: Surface>(
	state: &DiagramState,
	theme: Theme,
	surface: &mut S,
) -> Result<(), S::Error> {
	let (Gesture::Connecting(source), Some(pointer)) = (state.gesture(), state.last_pointer()) else {
		return Ok(());
	};
	let from = state.model.node(source).bounds.center();
	surface.line(
		from,
		pointer,
		theme.foreground.darker(state.model.config().outline_darken),
		RUBBER_BAND_WIDTH,
		&RUBBER_BAND_DASH,
	)
}
