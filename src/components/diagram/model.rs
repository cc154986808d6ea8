use std::collections::BTreeSet;
use std::fmt;

use log::{debug, warn};

use super::config::DiagramConfig;
use super::types::{Color, DiagramSeed, NodeId, Point, Rect};

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub bounds: Rect,
	pub color: Color,
}

type Observer = Box<dyn FnMut()>;

/// Nodes plus the undirected link relation between them.
///
/// `links` is index-aligned with `nodes`, and every edge is stored on both ends.
/// Ids are indices: nodes are only ever appended.
pub struct DiagramModel {
	config: DiagramConfig,
	nodes: Vec<Node>,
	links: Vec<BTreeSet<NodeId>>,
	observers: Vec<Observer>,
}

impl fmt::Debug for DiagramModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DiagramModel")
			.field("nodes", &self.nodes)
			.field("links", &self.links)
			.field("observers", &self.observers.len())
			.finish()
	}
}

impl DiagramModel {
	pub fn new(config: DiagramConfig) -> Self {
		Self {
			config,
			nodes: Vec::new(),
			links: Vec::new(),
			observers: Vec::new(),
		}
	}

	/// Builds a model from seed content. Seed nodes are placed as given, overlaps
	/// included; links naming unknown nodes or a node with itself are skipped.
	pub fn from_seed(config: DiagramConfig, seed: &DiagramSeed) -> Self {
		let mut model = Self::new(config);
		for &center in &seed.nodes {
			model.create_node(center);
		}
		for &(a, b) in &seed.links {
			if a == b || a.max(b) >= model.len() {
				warn!("skipping seed link {a} - {b}");
				continue;
			}
			model.toggle_link(a, b);
		}
		model
	}

	pub fn config(&self) -> &DiagramConfig {
		&self.config
	}

	/// Registers a callback fired after every visible change.
	pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
		self.observers.push(Box::new(observer));
	}

	fn notify(&mut self) {
		for observer in &mut self.observers {
			observer();
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id]
	}

	pub fn links(&self, id: NodeId) -> &BTreeSet<NodeId> {
		&self.links[id]
	}

	pub fn are_linked(&self, a: NodeId, b: NodeId) -> bool {
		self.links.get(a).is_some_and(|set| set.contains(&b))
	}

	/// Each undirected edge once, as `(low, high)`.
	pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
		self.links.iter().enumerate().flat_map(|(a, set)| {
			set.range(a + 1..).map(move |&b| (a, b))
		})
	}

	/// Adds a node centered on `center`. Collisions are the caller's concern.
	pub fn create_node(&mut self, center: Point) -> NodeId {
		let id = self.nodes.len();
		let bounds = Rect::centered_at(center, self.config.node_size);
		self.nodes.push(Node {
			id,
			bounds,
			color: self.config.node_color,
		});
		self.links.push(BTreeSet::new());
		debug!("created node {id} at ({}, {})", bounds.left(), bounds.top());
		self.notify();
		id
	}

	/// Adds the edge `a - b` if absent, removes it otherwise. Returns whether the
	/// nodes are linked afterwards.
	///
	/// Panics if either id is out of range.
	pub fn toggle_link(&mut self, a: NodeId, b: NodeId) -> bool {
		assert!(a.max(b) < self.nodes.len(), "unknown node id in link {a} - {b}");
		debug_assert_ne!(a, b, "self-links are not allowed");
		let linked = if self.links[a].remove(&b) {
			self.links[b].remove(&a);
			false
		} else {
			self.links[a].insert(b);
			self.links[b].insert(a);
			true
		};
		debug!("link {a} - {b} {}", if linked { "added" } else { "removed" });
		self.notify();
		linked
	}

	pub fn move_node(&mut self, id: NodeId, delta: Point) {
		let node = &mut self.nodes[id];
		node.bounds = node.bounds.translated(delta);
		self.notify();
	}

	/// True if `candidate` overlaps any node other than `exclude`.
	pub fn is_colliding(&self, candidate: &Rect, exclude: Option<NodeId>) -> bool {
		self.nodes
			.iter()
			.any(|node| Some(node.id) != exclude && node.bounds.intersects(candidate))
	}

	/// First node in creation order whose bounds contain `p`.
	pub fn node_at(&self, p: Point) -> Option<NodeId> {
		self.nodes.iter().find(|node| node.bounds.contains(p)).map(|node| node.id)
	}
}

impl Default for DiagramModel {
	fn default() -> Self {
		Self::new(DiagramConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use rstest::{fixture, rstest};

	use super::*;
	use crate::components::diagram::types::Size;

	fn link_sets(model: &DiagramModel) -> Vec<Vec<NodeId>> {
		(0..model.len())
			.map(|id| model.links(id).iter().copied().collect())
			.collect()
	}

	#[fixture]
	fn four_nodes() -> DiagramModel {
		let mut model = DiagramModel::default();
		for (x, y) in [(40.0, 40.0), (200.0, 60.0), (200.0, 200.0), (200.0, 400.0)] {
			model.create_node(Point::new(x, y));
		}
		model
	}

	#[rstest]
	fn creates_nodes_with_dense_ids_and_centered_bounds(four_nodes: DiagramModel) {
		let size = Size::new(100.0, 50.0);
		let expected = [(-10.0, 15.0), (150.0, 35.0), (150.0, 175.0), (150.0, 375.0)];
		assert_eq!(four_nodes.len(), 4);
		for (id, (x, y)) in expected.into_iter().enumerate() {
			let node = four_nodes.node(id);
			assert_eq!(node.id, id);
			assert_eq!(node.bounds, Rect::new(Point::new(x, y), size));
			assert_eq!(node.color, Color::RED);
		}
	}

	#[rstest]
	fn toggling_links_adds_then_removes(mut four_nodes: DiagramModel) {
		assert!(four_nodes.toggle_link(0, 1));
		assert!(four_nodes.toggle_link(3, 2));
		assert_eq!(link_sets(&four_nodes), vec![vec![1], vec![0], vec![3], vec![2]]);

		assert!(!four_nodes.toggle_link(0, 1));
		assert_eq!(link_sets(&four_nodes), vec![vec![], vec![], vec![3], vec![2]]);
	}

	#[rstest]
	fn edges_are_listed_once(mut four_nodes: DiagramModel) {
		four_nodes.toggle_link(2, 0);
		four_nodes.toggle_link(3, 1);
		four_nodes.toggle_link(1, 2);
		let edges: Vec<_> = four_nodes.edges().collect();
		assert_eq!(edges, vec![(0, 2), (1, 2), (1, 3)]);
	}

	#[rstest]
	fn observers_fire_on_every_mutation(mut four_nodes: DiagramModel) {
		let fired = Rc::new(Cell::new(0));
		let counter = fired.clone();
		four_nodes.subscribe(move || counter.set(counter.get() + 1));

		four_nodes.toggle_link(0, 1);
		four_nodes.toggle_link(0, 1);
		four_nodes.move_node(2, Point::new(5.0, 5.0));
		four_nodes.create_node(Point::new(600.0, 600.0));
		assert_eq!(fired.get(), 4);
	}

	#[rstest]
	fn own_bounds_do_not_collide_when_excluded(four_nodes: DiagramModel) {
		for node in four_nodes.nodes() {
			assert!(four_nodes.is_colliding(&node.bounds, None));
			assert!(!four_nodes.is_colliding(&node.bounds, Some(node.id)));
		}
	}

	#[rstest]
	fn collision_against_neighbour(four_nodes: DiagramModel) {
		let over_node_0 = four_nodes.node(1).bounds.translated(Point::new(-100.0, 0.0));
		assert!(four_nodes.is_colliding(&over_node_0, Some(1)));
		let touching = Rect::new(Point::new(90.0, 15.0), Size::new(60.0, 20.0));
		assert!(!four_nodes.is_colliding(&touching, None));
	}

	#[rstest]
	#[case(Point::new(0.0, 20.0), Some(0))]
	#[case(Point::new(200.0, 200.0), Some(2))]
	#[case(Point::new(500.0, 500.0), None)]
	fn hit_tests_by_bounds(four_nodes: DiagramModel, #[case] p: Point, #[case] expected: Option<NodeId>) {
		assert_eq!(four_nodes.node_at(p), expected);
	}

	#[test]
	fn first_created_node_wins_overlapping_hit_test() {
		let mut model = DiagramModel::default();
		model.create_node(Point::new(100.0, 100.0));
		model.create_node(Point::new(120.0, 110.0));
		assert_eq!(model.node_at(Point::new(115.0, 105.0)), Some(0));
	}

	#[test]
	fn seed_skips_invalid_links() {
		let seed = DiagramSeed {
			nodes: vec![Point::new(0.0, 0.0), Point::new(300.0, 0.0)],
			links: vec![(0, 1), (1, 1), (0, 9)],
		};
		let model = DiagramModel::from_seed(DiagramConfig::default(), &seed);
		assert_eq!(model.len(), 2);
		assert_eq!(link_sets(&model), vec![vec![1], vec![0]]);
	}

	#[test]
	#[should_panic]
	fn toggling_unknown_node_panics() {
		let mut model = DiagramModel::default();
		model.create_node(Point::new(0.0, 0.0));
		model.toggle_link(0, 7);
	}
}
