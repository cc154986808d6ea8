use std::cell::Cell;
use std::rc::Rc;

use diagram_canvas::components::diagram::{
	DiagramConfig, DiagramModel, DiagramState, Gesture, NodeId, Point, Rect, Size,
};

fn link_sets(model: &DiagramModel) -> Vec<Vec<NodeId>> {
	(0..model.len())
		.map(|id| model.links(id).iter().copied().collect())
		.collect()
}

fn seeded() -> DiagramState {
	let mut model = DiagramModel::new(DiagramConfig::default());
	for (x, y) in [(40.0, 40.0), (200.0, 60.0), (200.0, 200.0), (200.0, 400.0)] {
		model.create_node(Point::new(x, y));
	}
	DiagramState::new(model)
}

#[test]
fn sample_diagram_links_and_unlinks() {
	let mut state = seeded();
	let size = Size::new(100.0, 50.0);
	let origins = [(-10.0, 15.0), (150.0, 35.0), (150.0, 175.0), (150.0, 375.0)];
	for (id, (x, y)) in origins.into_iter().enumerate() {
		assert_eq!(state.model.node(id).bounds, Rect::new(Point::new(x, y), size));
	}

	state.model.toggle_link(0, 1);
	state.model.toggle_link(3, 2);
	assert_eq!(link_sets(&state.model), vec![vec![1], vec![0], vec![3], vec![2]]);

	state.model.toggle_link(0, 1);
	assert_eq!(link_sets(&state.model), vec![vec![], vec![], vec![3], vec![2]]);
}

#[test]
fn connect_drag_from_hit_point_links_once_and_keeps_position() {
	let mut state = seeded();
	let changes = Rc::new(Cell::new(0));
	let counter = changes.clone();
	state.model.subscribe(move || counter.set(counter.get() + 1));
	let before = state.model.node(2).bounds;

	state.pointer_down(Point::new(202.0, 198.0));
	assert_eq!(state.gesture(), Gesture::Connecting(2));
	state.pointer_move(Point::new(450.0, 300.0));
	state.pointer_move(Point::new(120.0, 90.0));
	state.pointer_up(Point::new(40.0, 40.0));

	assert_eq!(changes.get(), 1);
	assert_eq!(link_sets(&state.model), vec![vec![2], vec![], vec![0], vec![]]);
	assert_eq!(state.model.node(2).bounds, before);
}

#[test]
fn double_clicks_fill_free_space_only() {
	let mut state = seeded();
	state.double_click(Point::new(600.0, 100.0));
	state.double_click(Point::new(640.0, 110.0));
	state.double_click(Point::new(700.0, 100.0));
	assert_eq!(state.model.len(), 6);
	assert_eq!(state.model.node(5).bounds.center(), Point::new(700.0, 100.0));
}

#[test]
fn dragged_node_stops_at_neighbour() {
	let mut state = seeded();
	let start = state.model.node(3).bounds;
	state.pointer_down(Point::new(160.0, 380.0));
	// 200 up would land on node 2.
	state.pointer_move(Point::new(160.0, 180.0));
	assert_eq!(state.model.node(3).bounds, start);
	state.pointer_move(Point::new(160.0, 170.0));
	state.pointer_up(Point::new(160.0, 170.0));
	assert_eq!(state.model.node(3).bounds.origin, Point::new(150.0, 365.0));
	assert_eq!(state.gesture(), Gesture::Idle);
}
