use log::warn;

use super::changes::{EdgeChange, NodeChange};
use super::types::{
	Connection, DEFAULT_NODE_POSITION, NodeDataPatch, Point, TechniqueNode, TransitionEdge,
};
use crate::helpers;

/// Canonical graph state: the node set, the edge set, and the modal selection.
///
/// Every relationship exists twice: as a [`TransitionEdge`] in `edges` and as
/// the mirrored [`Connection`] on its source node. All mutation paths funnel
/// through [`GraphState::insert_edge`] and [`GraphState::remove_edge_entry`]
/// so the two sides are always updated together. Operations referencing a
/// missing id are logged no-ops; this store cannot fail.
#[derive(Clone, Debug, Default)]
pub struct GraphState {
	pub nodes: Vec<TechniqueNode>,
	pub edges: Vec<TransitionEdge>,
	/// Node currently open in the detail modal, if any.
	pub selected_node_id: Option<String>,
}

impl GraphState {
	pub fn new() -> Self {
		Self::default()
	}

	// ---- queries -----------------------------------------------------------

	pub fn node(&self, id: &str) -> Option<&TechniqueNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut TechniqueNode> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Every node except `id`.
	pub fn other_nodes(&self, id: &str) -> Vec<TechniqueNode> {
		self.nodes.iter().filter(|n| n.id != id).cloned().collect()
	}

	/// Nodes `source_id` could connect to: every other node not already
	/// targeted by one of its connections.
	pub fn available_targets(&self, source_id: &str) -> Vec<TechniqueNode> {
		let connected: Vec<&str> = self
			.node(source_id)
			.map(|n| {
				n.data
					.connections
					.iter()
					.map(|c| c.target_node_id.as_str())
					.collect()
			})
			.unwrap_or_default();

		self.nodes
			.iter()
			.filter(|n| n.id != source_id && !connected.contains(&n.id.as_str()))
			.cloned()
			.collect()
	}

	/// Edges with `node_id` as either endpoint.
	pub fn edges_touching(&self, node_id: &str) -> Vec<&TransitionEdge> {
		self.edges
			.iter()
			.filter(|e| e.source == node_id || e.target == node_id)
			.collect()
	}

	/// Display label for an id: the node's label, "Untitled" when that is
	/// empty, or the raw id when the node is gone.
	pub fn node_label(&self, id: &str) -> String {
		match self.node(id) {
			Some(node) => node.display_label().to_string(),
			None => id.to_string(),
		}
	}

	// ---- canvas change events ----------------------------------------------

	/// Fold a batch of canvas deltas into the node collection. Removals
	/// cascade exactly like [`GraphState::delete_node`]; the invariant does
	/// not depend on which path a removal arrives through.
	pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
		for change in changes {
			match change {
				NodeChange::Position { id, position } => match self.node_mut(&id) {
					Some(node) => node.position = position,
					None => warn!("position change for unknown node {id}"),
				},
				NodeChange::Remove { id } => self.delete_node(&id),
			}
		}
	}

	/// Fold a batch of canvas deltas into the edge collection, keeping the
	/// source-side connection lists in step.
	pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) {
		for change in changes {
			match change {
				EdgeChange::Remove { id } => self.remove_edge_entry(&id),
			}
		}
	}

	/// Canvas-gesture edge creation; a connection without a description.
	/// Self-loops and parallel edges are permitted.
	pub fn connect(&mut self, source_id: &str, target_id: &str) {
		self.add_connection(source_id, target_id, None);
	}

	// ---- node operations ---------------------------------------------------

	/// Append a fresh node with default data at `position` or the default
	/// coordinate.
	pub fn add_node(&mut self, position: Option<Point>) {
		self.nodes
			.push(TechniqueNode::new(position.unwrap_or(DEFAULT_NODE_POSITION)));
	}

	/// Shallow-merge `patch` into the node's data.
	pub fn update_node_data(&mut self, node_id: &str, patch: NodeDataPatch) {
		match self.node_mut(node_id) {
			Some(node) => node.data.apply(patch),
			None => warn!("data patch for unknown node {node_id}"),
		}
	}

	/// Remove the node, every edge touching it, and the mirrored connection
	/// on each surviving endpoint.
	pub fn delete_node(&mut self, node_id: &str) {
		let Some(index) = self.nodes.iter().position(|n| n.id == node_id) else {
			warn!("delete for unknown node {node_id}");
			return;
		};
		self.nodes.remove(index);

		let mut removed = Vec::new();
		self.edges.retain(|e| {
			if e.source == node_id || e.target == node_id {
				removed.push(e.clone());
				false
			} else {
				true
			}
		});

		for edge in removed {
			// Edges sourced at the deleted node took their connection entry
			// with them; only surviving sources need cleanup.
			if edge.source != node_id {
				if let Some(source) = self.node_mut(&edge.source) {
					source.data.connections.retain(|c| c.id != edge.id);
				}
			}
		}
	}

	// ---- connection operations ---------------------------------------------

	/// Atomically create an edge and its mirrored connection on the source
	/// node. The canonical path that keeps the dual representation
	/// consistent.
	pub fn add_connection(&mut self, source_id: &str, target_id: &str, description: Option<String>) {
		if !self.contains_node(source_id) {
			warn!("connection from unknown node {source_id}");
			return;
		}
		if !self.contains_node(target_id) {
			warn!("connection to unknown node {target_id}");
			return;
		}
		self.insert_edge(TransitionEdge::new(source_id, target_id, description));
	}

	/// Update the connection's description and the edge's label together;
	/// afterwards the two are equal.
	pub fn update_connection(
		&mut self,
		node_id: &str,
		connection_id: &str,
		description: Option<String>,
	) {
		match self
			.node_mut(node_id)
			.and_then(|n| n.data.connections.iter_mut().find(|c| c.id == connection_id))
		{
			Some(connection) => connection.description = description.clone(),
			None => warn!("description update for unknown connection {connection_id} on {node_id}"),
		}
		match self.edges.iter_mut().find(|e| e.id == connection_id) {
			Some(edge) => edge.label = description,
			None => warn!("label update for unknown edge {connection_id}"),
		}
	}

	/// Remove the connection entry from the node and the matching edge from
	/// the edge collection. Both removals are required.
	pub fn delete_connection(&mut self, node_id: &str, connection_id: &str) {
		match self.node_mut(node_id) {
			Some(node) => node.data.connections.retain(|c| c.id != connection_id),
			None => warn!("connection delete on unknown node {node_id}"),
		}
		match self.edges.iter().position(|e| e.id == connection_id) {
			Some(index) => {
				self.edges.remove(index);
			}
			None => warn!("no edge matching connection {connection_id}"),
		}
	}

	// ---- selection ---------------------------------------------------------

	pub fn open_node_modal(&mut self, node_id: &str) {
		self.selected_node_id = Some(node_id.to_string());
	}

	pub fn close_node_modal(&mut self) {
		self.selected_node_id = None;
	}

	/// Reset nodes, edges and the selection.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
		self.selected_node_id = None;
	}

	// ---- internal ----------------------------------------------------------

	fn insert_edge(&mut self, edge: TransitionEdge) {
		let connection = Connection {
			id: edge.id.clone(),
			target_node_id: edge.target.clone(),
			description: edge.label.clone(),
			created_at: helpers::now_ms(),
		};
		let Some(source) = self.node_mut(&edge.source) else {
			warn!("edge insert from unknown node {}", edge.source);
			return;
		};
		source.data.connections.push(connection);
		self.edges.push(edge);
	}

	fn remove_edge_entry(&mut self, edge_id: &str) {
		let Some(index) = self.edges.iter().position(|e| e.id == edge_id) else {
			warn!("removal of unknown edge {edge_id}");
			return;
		};
		let edge = self.edges.remove(index);
		if let Some(source) = self.node_mut(&edge.source) {
			source.data.connections.retain(|c| c.id != edge.id);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::types::{NodeData, NodeKind};

	fn seed(state: &mut GraphState, id: &str) {
		state.nodes.push(TechniqueNode {
			id: id.to_string(),
			position: Point::default(),
			data: NodeData {
				label: id.to_uppercase(),
				..NodeData::default()
			},
		});
	}

	fn two_nodes() -> GraphState {
		let mut state = GraphState::new();
		seed(&mut state, "a");
		seed(&mut state, "b");
		state
	}

	/// Every edge has exactly one mirrored connection on its source node,
	/// with matching target and description, and no connection is stray.
	fn assert_mirrored(state: &GraphState) {
		for edge in &state.edges {
			let source = state.node(&edge.source).expect("edge source exists");
			assert!(state.contains_node(&edge.target), "edge target exists");
			let mirrors: Vec<&Connection> = source
				.data
				.connections
				.iter()
				.filter(|c| c.id == edge.id)
				.collect();
			assert_eq!(mirrors.len(), 1, "exactly one mirror for edge {}", edge.id);
			assert_eq!(mirrors[0].target_node_id, edge.target);
			assert_eq!(mirrors[0].description, edge.label);
		}
		for node in &state.nodes {
			for connection in &node.data.connections {
				assert!(
					state.edges.iter().any(|e| e.id == connection.id),
					"connection {} is backed by an edge",
					connection.id,
				);
			}
		}
	}

	#[test]
	fn add_node_uses_position_and_defaults() {
		let mut state = GraphState::new();
		state.add_node(Some(Point::new(10.0, 20.0)));

		assert_eq!(state.nodes.len(), 1);
		let node = &state.nodes[0];
		assert_eq!(node.position, Point::new(10.0, 20.0));
		assert_eq!(node.data.label, "Untitled");
		assert_eq!(node.data.kind, NodeKind::None);
		assert!(node.data.connections.is_empty());
	}

	#[test]
	fn add_node_without_position_lands_on_the_default() {
		let mut state = GraphState::new();
		state.add_node(None);
		assert_eq!(state.nodes[0].position, DEFAULT_NODE_POSITION);
	}

	#[test]
	fn add_connection_creates_edge_and_mirror() {
		let mut state = two_nodes();
		state.add_connection("a", "b", Some("follow up".to_string()));

		assert_eq!(state.edges.len(), 1);
		let edge = &state.edges[0];
		assert_eq!(edge.source, "a");
		assert_eq!(edge.target, "b");
		assert_eq!(edge.label.as_deref(), Some("follow up"));
		assert_eq!(edge.kind, "default");

		let connections = &state.node("a").unwrap().data.connections;
		assert_eq!(connections.len(), 1);
		assert_eq!(connections[0].id, edge.id);
		assert_eq!(connections[0].target_node_id, "b");
		assert_eq!(connections[0].description.as_deref(), Some("follow up"));
		assert_mirrored(&state);
	}

	#[test]
	fn connect_is_a_connection_without_description() {
		let mut state = two_nodes();
		state.connect("a", "b");

		assert_eq!(state.edges[0].label, None);
		assert_eq!(state.node("a").unwrap().data.connections[0].description, None);
		assert_mirrored(&state);
	}

	#[test]
	fn self_loops_and_parallel_edges_are_permitted() {
		let mut state = two_nodes();
		state.connect("a", "a");
		state.add_connection("a", "b", None);
		state.add_connection("a", "b", Some("again".to_string()));

		assert_eq!(state.edges.len(), 3);
		assert_eq!(state.node("a").unwrap().data.connections.len(), 3);
		assert_mirrored(&state);
	}

	#[test]
	fn add_connection_on_missing_endpoint_is_a_noop() {
		let mut state = two_nodes();
		state.add_connection("a", "ghost", None);
		state.add_connection("ghost", "b", None);

		assert!(state.edges.is_empty());
		assert!(state.node("a").unwrap().data.connections.is_empty());
	}

	#[test]
	fn update_node_data_merges_partially() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);
		state.update_node_data(
			"a",
			NodeDataPatch {
				label: Some("New Title".to_string()),
				..NodeDataPatch::default()
			},
		);

		let node = state.node("a").unwrap();
		assert_eq!(node.data.label, "New Title");
		assert_eq!(node.data.connections.len(), 1);
		assert_mirrored(&state);
	}

	#[test]
	fn update_node_data_on_missing_node_is_a_noop() {
		let mut state = two_nodes();
		let before = state.clone();
		state.update_node_data(
			"ghost",
			NodeDataPatch {
				label: Some("x".to_string()),
				..NodeDataPatch::default()
			},
		);
		assert_eq!(state.nodes, before.nodes);
	}

	#[test]
	fn update_connection_keeps_both_sides_equal() {
		let mut state = two_nodes();
		state.add_connection("a", "b", Some("old".to_string()));
		let id = state.edges[0].id.clone();

		state.update_connection("a", &id, Some("x".to_string()));

		assert_eq!(state.edges[0].label.as_deref(), Some("x"));
		assert_eq!(
			state.node("a").unwrap().data.connections[0]
				.description
				.as_deref(),
			Some("x"),
		);
		assert_mirrored(&state);
	}

	#[test]
	fn delete_connection_removes_both_sides() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);
		let id = state.edges[0].id.clone();

		state.delete_connection("a", &id);

		assert!(state.edges.is_empty());
		assert!(state.node("a").unwrap().data.connections.is_empty());
	}

	#[test]
	fn delete_node_cascades_to_edges_and_survivor_connections() {
		let mut state = two_nodes();
		state.add_connection("a", "b", Some("e1".to_string()));

		state.delete_node("b");

		assert_eq!(state.nodes.len(), 1);
		assert_eq!(state.nodes[0].id, "a");
		assert!(state.edges.is_empty());
		assert!(state.node("a").unwrap().data.connections.is_empty());
		assert_mirrored(&state);
	}

	#[test]
	fn delete_node_on_the_source_side_leaves_the_target_clean() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);
		state.add_connection("b", "a", None);

		state.delete_node("a");

		assert_eq!(state.nodes.len(), 1);
		assert!(state.edges.is_empty());
		assert!(state.node("b").unwrap().data.connections.is_empty());
		assert_mirrored(&state);
	}

	#[test]
	fn node_removal_via_canvas_changes_cascades_the_same_way() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);

		state.apply_node_changes(vec![NodeChange::Remove {
			id: "b".to_string(),
		}]);

		assert!(state.edges.is_empty());
		assert!(state.node("a").unwrap().data.connections.is_empty());
	}

	#[test]
	fn position_changes_touch_nothing_but_position() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);

		state.apply_node_changes(vec![NodeChange::Position {
			id: "a".to_string(),
			position: Point::new(5.0, -3.0),
		}]);

		let node = state.node("a").unwrap();
		assert_eq!(node.position, Point::new(5.0, -3.0));
		assert_eq!(node.data.label, "A");
		assert_eq!(node.data.connections.len(), 1);
	}

	#[test]
	fn edge_removal_via_canvas_changes_drops_the_mirror() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);
		let id = state.edges[0].id.clone();

		state.apply_edge_changes(vec![EdgeChange::Remove { id }]);

		assert!(state.edges.is_empty());
		assert!(state.node("a").unwrap().data.connections.is_empty());
		assert_mirrored(&state);
	}

	#[test]
	fn other_nodes_excludes_only_the_given_id() {
		let mut state = two_nodes();
		seed(&mut state, "c");

		let others: Vec<String> = state.other_nodes("a").into_iter().map(|n| n.id).collect();
		assert_eq!(others, vec!["b".to_string(), "c".to_string()]);
	}

	#[test]
	fn available_targets_exclude_self_and_already_connected() {
		let mut state = two_nodes();
		seed(&mut state, "c");
		state.add_connection("a", "b", None);

		let targets = state.available_targets("a");
		assert_eq!(targets.len(), 1);
		assert_eq!(targets[0].id, "c");
	}

	#[test]
	fn edges_touching_counts_both_directions() {
		let mut state = two_nodes();
		seed(&mut state, "c");
		state.add_connection("a", "b", None);
		state.add_connection("c", "a", None);

		assert_eq!(state.edges_touching("a").len(), 2);
		assert_eq!(state.edges_touching("b").len(), 1);
	}

	#[test]
	fn node_label_falls_back_sensibly() {
		let mut state = two_nodes();
		state.node_mut("a").unwrap().data.label.clear();

		assert_eq!(state.node_label("a"), "Untitled");
		assert_eq!(state.node_label("b"), "B");
		assert_eq!(state.node_label("ghost"), "ghost");
	}

	#[test]
	fn modal_selection_opens_closes_and_close_is_idempotent() {
		let mut state = two_nodes();
		state.open_node_modal("a");
		assert_eq!(state.selected_node_id.as_deref(), Some("a"));

		state.close_node_modal();
		assert_eq!(state.selected_node_id, None);

		state.close_node_modal();
		assert_eq!(state.selected_node_id, None);
	}

	#[test]
	fn clear_resets_everything() {
		let mut state = two_nodes();
		state.add_connection("a", "b", None);
		state.open_node_modal("a");

		state.clear();

		assert!(state.nodes.is_empty());
		assert!(state.edges.is_empty());
		assert_eq!(state.selected_node_id, None);
	}
}
