use log::{debug, trace};

use super::config::{DiagramConfig, LinkPolicy};
use super::model::DiagramModel;
use super::types::{NodeId, Point, Rect};

/// The gesture in progress, fixed at pointer-down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
	#[default]
	Idle,
	Moving(NodeId),
	Connecting(NodeId),
}

impl Gesture {
	pub fn dragging(self) -> Option<NodeId> {
		match self {
			Gesture::Idle => None,
			Gesture::Moving(id) | Gesture::Connecting(id) => Some(id),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
	Default,
	Move,
}

impl CursorHint {
	pub fn css(self) -> &'static str {
		match self {
			CursorHint::Default => "default",
			CursorHint::Move => "move",
		}
	}
}

/// What the shell should do after an input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
	pub redraw: bool,
	pub cursor: Option<CursorHint>,
}

impl Reaction {
	const NONE: Reaction = Reaction {
		redraw: false,
		cursor: None,
	};
	const REDRAW: Reaction = Reaction {
		redraw: true,
		cursor: None,
	};
}

/// Pointer gesture state layered over a [`DiagramModel`].
///
/// Only the model is mutated by the handlers; hover and drag state live here and
/// are reported back through [`Reaction`] rather than repainting on assignment.
#[derive(Debug)]
pub struct DiagramState {
	pub model: DiagramModel,
	hovered: Option<NodeId>,
	gesture: Gesture,
	last_pointer: Option<Point>,
	hit_point_radius: f64,
	link_policy: LinkPolicy,
}

impl DiagramState {
	pub fn new(model: DiagramModel) -> Self {
		let config = model.config();
		let (hit_point_radius, link_policy) = (config.hit_point_radius, config.link_policy);
		Self {
			model,
			hovered: None,
			gesture: Gesture::Idle,
			last_pointer: None,
			hit_point_radius,
			link_policy,
		}
	}

	pub fn hovered(&self) -> Option<NodeId> {
		self.hovered
	}

	pub fn gesture(&self) -> Gesture {
		self.gesture
	}

	pub fn last_pointer(&self) -> Option<Point> {
		self.last_pointer
	}

	fn in_hit_point(&self, id: NodeId, p: Point) -> bool {
		self.model.node(id).bounds.center().distance_to(p) <= self.hit_point_radius
	}

	/// Places a node at `pos` unless it would overlap an existing one.
	pub fn double_click(&mut self, pos: Point) -> Reaction {
		let candidate = Rect::centered_at(pos, self.model.config().node_size);
		if self.model.is_colliding(&candidate, None) {
			trace!("no room for a node at ({}, {})", pos.x, pos.y);
			return Reaction::NONE;
		}
		self.model.create_node(pos);
		Reaction::REDRAW
	}

	pub fn pointer_down(&mut self, pos: Point) -> Reaction {
		self.last_pointer = Some(pos);
		self.gesture = match self.model.node_at(pos) {
			Some(id) if self.in_hit_point(id, pos) => Gesture::Connecting(id),
			Some(id) => Gesture::Moving(id),
			None => Gesture::Idle,
		};
		if self.gesture != Gesture::Idle {
			debug!("gesture started: {:?}", self.gesture);
		}
		Reaction::NONE
	}

	pub fn pointer_move(&mut self, pos: Point) -> Reaction {
		let hovered = self.model.node_at(pos);
		let mut redraw = hovered != self.hovered;
		self.hovered = hovered;

		match (self.gesture, self.last_pointer) {
			(Gesture::Moving(id), Some(last)) => {
				let delta = pos - last;
				let candidate = self.model.node(id).bounds.translated(delta);
				if self.model.is_colliding(&candidate, Some(id)) {
					trace!("move of node {id} blocked");
				} else {
					self.model.move_node(id, delta);
					redraw = true;
				}
			}
			(Gesture::Connecting(_), _) => redraw = true,
			_ => {}
		}
		self.last_pointer = Some(pos);

		let cursor = if hovered.is_some() {
			CursorHint::Move
		} else {
			CursorHint::Default
		};
		Reaction {
			redraw,
			cursor: Some(cursor),
		}
	}

	pub fn pointer_up(&mut self, pos: Point) -> Reaction {
		let may_link = match (self.gesture, self.link_policy) {
			(Gesture::Idle, _) => false,
			(Gesture::Moving(_), LinkPolicy::ConnectOnly) => false,
			_ => true,
		};
		if let (true, Some(source), Some(dest)) =
			(may_link, self.gesture.dragging(), self.model.node_at(pos))
		{
			if source != dest {
				self.model.toggle_link(source, dest);
			}
		}
		self.reset_gesture();
		Reaction::REDRAW
	}

	/// The pointer left the canvas: drop the gesture without linking.
	pub fn pointer_leave(&mut self) -> Reaction {
		self.reset_gesture();
		self.hovered = None;
		Reaction {
			redraw: true,
			cursor: Some(CursorHint::Default),
		}
	}

	fn reset_gesture(&mut self) {
		if self.gesture != Gesture::Idle {
			debug!("gesture ended: {:?}", self.gesture);
		}
		self.gesture = Gesture::Idle;
		self.last_pointer = None;
	}
}
