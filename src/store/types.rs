use crate::helpers;

/// 2D position in graph (world) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Position a node gets when created without an explicit coordinate.
pub const DEFAULT_NODE_POSITION: Point = Point { x: 200.0, y: 200.0 };

/// Category of a technique node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeKind {
	Position,
	Action,
	Reaction,
	Submission,
	#[default]
	None,
}

impl NodeKind {
	pub const ALL: [NodeKind; 5] = [
		NodeKind::Position,
		NodeKind::Action,
		NodeKind::Reaction,
		NodeKind::Submission,
		NodeKind::None,
	];

	pub fn label(&self) -> &'static str {
		match self {
			NodeKind::Position => "Position",
			NodeKind::Action => "Action",
			NodeKind::Reaction => "Reaction",
			NodeKind::Submission => "Submission",
			NodeKind::None => "None",
		}
	}

	/// Inverse of [`NodeKind::label`]; unknown strings fall back to `None`.
	pub fn parse(value: &str) -> Self {
		Self::ALL
			.iter()
			.copied()
			.find(|kind| kind.label() == value)
			.unwrap_or_default()
	}

	/// Fill color used by the canvas for nodes of this kind.
	pub fn color(&self) -> &'static str {
		match self {
			NodeKind::Position => "#1f77b4",
			NodeKind::Action => "#2ca02c",
			NodeKind::Reaction => "#ff7f0e",
			NodeKind::Submission => "#d62728",
			NodeKind::None => "#7f7f7f",
		}
	}
}

/// Node-local denormalized view of one outgoing edge.
///
/// `id` always equals the id of the mirrored [`TransitionEdge`].
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub id: String,
	pub target_node_id: String,
	pub description: Option<String>,
	/// Creation time in epoch milliseconds.
	pub created_at: f64,
}

/// Editable payload of a technique node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeData {
	/// Display title; empty renders as "Untitled".
	pub label: String,
	pub kind: NodeKind,
	/// Free-text body; treated as an opaque string.
	pub description: String,
	/// Secondary free-text body staged by the node editor.
	pub content: String,
	/// Outgoing edges, mirrored from the edge collection.
	pub connections: Vec<Connection>,
	pub youtube_url: Option<String>,
	/// Derived from `youtube_url`; thumbnail lookup key.
	pub youtube_video_id: Option<String>,
}

/// A graph vertex representing one technique or step.
#[derive(Clone, Debug, PartialEq)]
pub struct TechniqueNode {
	pub id: String,
	/// Owned by the canvas; mutated only through move change events.
	pub position: Point,
	pub data: NodeData,
}

impl TechniqueNode {
	/// A fresh node with default data at the given position.
	pub fn new(position: Point) -> Self {
		Self {
			id: helpers::new_id("node"),
			position,
			data: NodeData {
				label: "Untitled".to_string(),
				..NodeData::default()
			},
		}
	}

	pub fn display_label(&self) -> &str {
		if self.data.label.is_empty() {
			"Untitled"
		} else {
			&self.data.label
		}
	}
}

/// The only edge kind in use; a rendering hint, not a semantic.
pub const DEFAULT_EDGE_KIND: &str = "default";

/// A directed transition between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	/// Same semantic value as the mirrored connection's `description`.
	pub label: Option<String>,
	pub kind: String,
}

impl TransitionEdge {
	pub fn new(source: &str, target: &str, label: Option<String>) -> Self {
		Self {
			id: helpers::new_id("edge"),
			source: source.to_string(),
			target: target.to_string(),
			label,
			kind: DEFAULT_EDGE_KIND.to_string(),
		}
	}
}

/// Shallow patch over [`NodeData`]; `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct NodeDataPatch {
	pub label: Option<String>,
	pub kind: Option<NodeKind>,
	pub description: Option<String>,
	pub content: Option<String>,
	pub connections: Option<Vec<Connection>>,
	pub youtube_url: Option<Option<String>>,
	pub youtube_video_id: Option<Option<String>>,
}

impl NodeData {
	/// Merge a patch, field by field.
	pub fn apply(&mut self, patch: NodeDataPatch) {
		if let Some(label) = patch.label {
			self.label = label;
		}
		if let Some(kind) = patch.kind {
			self.kind = kind;
		}
		if let Some(description) = patch.description {
			self.description = description;
		}
		if let Some(content) = patch.content {
			self.content = content;
		}
		if let Some(connections) = patch.connections {
			self.connections = connections;
		}
		if let Some(youtube_url) = patch.youtube_url {
			self.youtube_url = youtube_url;
		}
		if let Some(youtube_video_id) = patch.youtube_video_id {
			self.youtube_video_id = youtube_video_id;
		}
	}
}
