use crate::helpers;
use crate::store::{Connection, GraphState, NodeDataPatch, NodeKind, TechniqueNode};

/// Local, uncommitted copy of one node's editable fields.
///
/// Title, kind, body and video URL stay staged in here until an explicit
/// save and are discarded on cancel. Connection edits are the exception:
/// they are applied to the store immediately so the canvas shows new edges
/// as they appear, and the store's list is mirrored back via
/// [`mirror_connections`].
#[derive(Clone, Debug, PartialEq)]
pub struct EditBuffer {
	pub node_id: String,
	pub label: String,
	pub kind: NodeKind,
	pub content: String,
	/// Staged as raw text; empty means unset.
	pub youtube_url: String,
	pub connections: Vec<Connection>,
}

impl EditBuffer {
	/// A blank buffer; used only as a fallback when the node vanishes
	/// between resolution and panel construction.
	pub fn empty(node_id: &str) -> Self {
		Self {
			node_id: node_id.to_string(),
			label: String::new(),
			kind: NodeKind::None,
			content: String::new(),
			youtube_url: String::new(),
			connections: Vec::new(),
		}
	}

	/// Snapshot the node's current data as the session's starting point.
	pub fn from_node(node: &TechniqueNode) -> Self {
		Self {
			node_id: node.id.clone(),
			label: node.data.label.clone(),
			kind: node.data.kind,
			content: node.data.content.clone(),
			youtube_url: node.data.youtube_url.clone().unwrap_or_default(),
			connections: node.data.connections.clone(),
		}
	}

	/// The single patch committed on save. The node's independent
	/// `description` field is deliberately absent so it survives untouched.
	pub fn into_patch(self) -> NodeDataPatch {
		let url = self.youtube_url.trim().to_string();
		let youtube_url = (!url.is_empty()).then_some(url);
		let youtube_video_id = youtube_url
			.as_deref()
			.and_then(helpers::youtube_video_id);

		NodeDataPatch {
			label: Some(self.label),
			kind: Some(self.kind),
			content: Some(self.content),
			connections: Some(self.connections),
			youtube_url: Some(youtube_url),
			youtube_video_id: Some(youtube_video_id),
			..NodeDataPatch::default()
		}
	}
}

/// What the modal should render for the current selection.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalMode {
	/// Nothing selected; the modal renders nothing.
	Hidden,
	/// Selection resolves to an existing node.
	Editor(String),
	/// Selection no longer resolves; only a close affordance is offered.
	Missing(String),
}

/// Resolve the selection against the current node collection.
pub fn resolve(selected: Option<&str>, state: &GraphState) -> ModalMode {
	match selected {
		None => ModalMode::Hidden,
		Some(id) if state.contains_node(id) => ModalMode::Editor(id.to_string()),
		Some(id) => ModalMode::Missing(id.to_string()),
	}
}

/// Re-read the store-side connection list after an immediate connection
/// edit, so the buffer and the canvas agree.
pub fn mirror_connections(state: &GraphState, node_id: &str) -> Vec<Connection> {
	state
		.node(node_id)
		.map(|n| n.data.connections.clone())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::{NodeData, Point};

	fn state_with_node(id: &str, label: &str) -> GraphState {
		let mut state = GraphState::new();
		state.nodes.push(TechniqueNode {
			id: id.to_string(),
			position: Point::default(),
			data: NodeData {
				label: label.to_string(),
				kind: NodeKind::Position,
				description: "left alone".to_string(),
				content: "body".to_string(),
				..NodeData::default()
			},
		});
		state
	}

	#[test]
	fn buffer_snapshots_the_node() {
		let state = state_with_node("a", "Closed Guard");
		let buffer = EditBuffer::from_node(state.node("a").unwrap());

		assert_eq!(buffer.node_id, "a");
		assert_eq!(buffer.label, "Closed Guard");
		assert_eq!(buffer.kind, NodeKind::Position);
		assert_eq!(buffer.content, "body");
		assert_eq!(buffer.youtube_url, "");
		assert!(buffer.connections.is_empty());
	}

	#[test]
	fn staged_edits_do_not_touch_the_store_until_committed() {
		let mut state = state_with_node("a", "Closed Guard");
		let mut buffer = EditBuffer::from_node(state.node("a").unwrap());

		buffer.label = "New Title".to_string();
		// Cancel path: the buffer is dropped, nothing was written.
		assert_eq!(state.node("a").unwrap().data.label, "Closed Guard");

		// Save path: one patch carries every staged field.
		state.update_node_data("a", buffer.into_patch());
		let data = &state.node("a").unwrap().data;
		assert_eq!(data.label, "New Title");
		assert_eq!(data.description, "left alone");
	}

	#[test]
	fn commit_derives_the_video_id() {
		let mut state = state_with_node("a", "Closed Guard");
		let mut buffer = EditBuffer::from_node(state.node("a").unwrap());
		buffer.youtube_url = "https://youtu.be/dQw4w9WgXcQ".to_string();

		state.update_node_data("a", buffer.into_patch());

		let data = &state.node("a").unwrap().data;
		assert_eq!(data.youtube_url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
		assert_eq!(data.youtube_video_id.as_deref(), Some("dQw4w9WgXcQ"));
	}

	#[test]
	fn commit_with_empty_url_unsets_both_fields() {
		let mut state = state_with_node("a", "Closed Guard");
		state.nodes[0].data.youtube_url = Some("https://youtu.be/x".to_string());
		state.nodes[0].data.youtube_video_id = Some("x".to_string());

		let mut buffer = EditBuffer::from_node(state.node("a").unwrap());
		buffer.youtube_url = "  ".to_string();
		state.update_node_data("a", buffer.into_patch());

		let data = &state.node("a").unwrap().data;
		assert_eq!(data.youtube_url, None);
		assert_eq!(data.youtube_video_id, None);
	}

	#[test]
	fn resolve_maps_selection_to_mode() {
		let state = state_with_node("a", "Closed Guard");

		assert_eq!(resolve(None, &state), ModalMode::Hidden);
		assert_eq!(resolve(Some("a"), &state), ModalMode::Editor("a".to_string()));
		assert_eq!(
			resolve(Some("ghost-id"), &state),
			ModalMode::Missing("ghost-id".to_string()),
		);
	}

	#[test]
	fn resolving_a_ghost_id_mutates_nothing() {
		let state = state_with_node("a", "Closed Guard");
		let before = state.clone();

		let _ = resolve(Some("ghost-id"), &state);

		assert_eq!(state.nodes, before.nodes);
		assert_eq!(state.edges, before.edges);
	}

	#[test]
	fn switching_nodes_reinitializes_the_buffer() {
		let mut state = state_with_node("a", "Closed Guard");
		state.nodes.push(TechniqueNode {
			id: "b".to_string(),
			position: Point::default(),
			data: NodeData {
				label: "Mount".to_string(),
				..NodeData::default()
			},
		});

		let mut buffer = EditBuffer::from_node(state.node("a").unwrap());
		buffer.label = "staged, never saved".to_string();

		let buffer = EditBuffer::from_node(state.node("b").unwrap());
		assert_eq!(buffer.label, "Mount");
		assert!(buffer.connections.is_empty());
	}

	#[test]
	fn mirror_picks_up_immediate_connection_edits() {
		let mut state = state_with_node("a", "Closed Guard");
		state.nodes.push(TechniqueNode {
			id: "b".to_string(),
			position: Point::default(),
			data: NodeData::default(),
		});
		let mut buffer = EditBuffer::from_node(state.node("a").unwrap());

		state.add_connection("a", "b", Some("sweep".to_string()));
		buffer.connections = mirror_connections(&state, "a");

		assert_eq!(buffer.connections.len(), 1);
		assert_eq!(buffer.connections[0].target_node_id, "b");
	}
}
