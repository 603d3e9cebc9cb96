//! The graph store: canonical state plus its reactive shell.
//!
//! [`GraphState`] owns every invariant and is plain Rust so it can be tested
//! natively. [`GraphStore`] wraps it in a single `RwSignal` and is provided
//! through context so any component can read snapshots or request mutations
//! without coupling to its siblings. Collections are replaced on write,
//! never mutated in place by consumers.

mod changes;
mod sample;
mod state;
mod types;

pub use changes::{EdgeChange, NodeChange};
pub use sample::sample_graph;
pub use state::GraphState;
pub use types::{
	Connection, NodeData, NodeDataPatch, NodeKind, Point, TechniqueNode, TransitionEdge,
};

use leptos::prelude::*;

/// Shared reactive handle to the canonical [`GraphState`].
#[derive(Clone, Copy)]
pub struct GraphStore {
	state: RwSignal<GraphState>,
}

impl GraphStore {
	pub fn new(initial: GraphState) -> Self {
		Self {
			state: RwSignal::new(initial),
		}
	}

	/// Tracked read of the current state.
	pub fn with<T>(&self, f: impl FnOnce(&GraphState) -> T) -> T {
		self.state.with(f)
	}

	/// Untracked read, for event handlers that must not subscribe.
	pub fn with_untracked<T>(&self, f: impl FnOnce(&GraphState) -> T) -> T {
		self.state.with_untracked(f)
	}

	fn update(&self, f: impl FnOnce(&mut GraphState)) {
		self.state.update(f);
	}

	// ---- snapshots ---------------------------------------------------------

	pub fn nodes(&self) -> Vec<TechniqueNode> {
		self.with(|s| s.nodes.clone())
	}

	pub fn edges(&self) -> Vec<TransitionEdge> {
		self.with(|s| s.edges.clone())
	}

	pub fn selected_node_id(&self) -> Option<String> {
		self.with(|s| s.selected_node_id.clone())
	}

	// ---- operations --------------------------------------------------------

	pub fn apply_node_changes(&self, changes: Vec<NodeChange>) {
		self.update(|s| s.apply_node_changes(changes));
	}

	pub fn apply_edge_changes(&self, changes: Vec<EdgeChange>) {
		self.update(|s| s.apply_edge_changes(changes));
	}

	pub fn connect(&self, source_id: &str, target_id: &str) {
		self.update(|s| s.connect(source_id, target_id));
	}

	pub fn add_node(&self, position: Option<Point>) {
		self.update(|s| s.add_node(position));
	}

	pub fn update_node_data(&self, node_id: &str, patch: NodeDataPatch) {
		self.update(|s| s.update_node_data(node_id, patch));
	}

	pub fn add_connection(&self, source_id: &str, target_id: &str, description: Option<String>) {
		self.update(|s| s.add_connection(source_id, target_id, description));
	}

	pub fn update_connection(
		&self,
		node_id: &str,
		connection_id: &str,
		description: Option<String>,
	) {
		self.update(|s| s.update_connection(node_id, connection_id, description));
	}

	pub fn delete_connection(&self, node_id: &str, connection_id: &str) {
		self.update(|s| s.delete_connection(node_id, connection_id));
	}

	pub fn delete_node(&self, node_id: &str) {
		self.update(|s| s.delete_node(node_id));
	}

	pub fn open_node_modal(&self, node_id: &str) {
		self.update(|s| s.open_node_modal(node_id));
	}

	pub fn close_node_modal(&self) {
		self.update(|s| s.close_node_modal());
	}

	pub fn clear(&self) {
		self.update(|s| s.clear());
	}
}

/// Create the store around `initial` and put it into context.
pub fn provide_graph_store(initial: GraphState) -> GraphStore {
	let store = GraphStore::new(initial);
	provide_context(store);
	store
}

/// The store provided by an ancestor; panics outside the app tree.
pub fn use_graph_store() -> GraphStore {
	expect_context::<GraphStore>()
}
