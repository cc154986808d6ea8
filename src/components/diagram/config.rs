use super::types::{Color, Size};

pub const NODE_WIDTH: f64 = 100.0;
pub const NODE_HEIGHT: f64 = 50.0;
pub const HIT_POINT_RADIUS: f64 = 10.0;
pub const CORNER_ROUNDING: f64 = 5.0;

/// Lightness factor (percent) applied to the hovered node.
pub const HOVER_LIGHTEN: u32 = 130;
/// Darkness factor (percent) for the hit-point outline.
pub const OUTLINE_DARKEN: u32 = 120;

/// Which finished drags may toggle a link when dropped on another node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkPolicy {
	/// Both move and connect gestures link on drop.
	#[default]
	AnyDrag,
	/// Only gestures that started on a hit-point link on drop.
	ConnectOnly,
}

/// Static settings shared by the model, the controller and the painter.
///
/// Built once at startup and handed out by value; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramConfig {
	pub node_size: Size,
	pub hit_point_radius: f64,
	pub rounding: f64,
	pub node_color: Color,
	pub hover_lighten: u32,
	pub outline_darken: u32,
	pub background: Color,
	pub link_policy: LinkPolicy,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			node_size: Size::new(NODE_WIDTH, NODE_HEIGHT),
			hit_point_radius: HIT_POINT_RADIUS,
			rounding: CORNER_ROUNDING,
			node_color: Color::RED,
			hover_lighten: HOVER_LIGHTEN,
			outline_darken: OUTLINE_DARKEN,
			background: Color::rgb(0xf5, 0xf5, 0xf5),
			link_policy: LinkPolicy::AnyDrag,
		}
	}
}

impl DiagramConfig {
	pub fn with_link_policy(self, link_policy: LinkPolicy) -> Self {
		Self {
			link_policy,
			..self
		}
	}
}
