use super::types::Point;

/// Deltas the canvas reports back for nodes.
///
/// The canvas owns geometry, so position updates arrive here rather than
/// through [`super::GraphState::update_node_data`].
#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
	Position { id: String, position: Point },
	Remove { id: String },
}

/// Deltas the canvas reports back for edges.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
	Remove { id: String },
}
