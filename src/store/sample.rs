use super::state::GraphState;
use super::types::{NodeData, NodeKind, Point, TechniqueNode};

fn seed_node(
	state: &mut GraphState,
	id: &str,
	position: Point,
	label: &str,
	kind: NodeKind,
	content: &str,
) {
	state.nodes.push(TechniqueNode {
		id: id.to_string(),
		position,
		data: NodeData {
			label: label.to_string(),
			kind,
			content: content.to_string(),
			..NodeData::default()
		},
	});
}

/// Starter graph shown on first load: a short shin-to-shin guard sequence.
pub fn sample_graph() -> GraphState {
	let mut state = GraphState::new();

	seed_node(
		&mut state,
		"node-shin-to-shin",
		Point::new(0.0, 0.0),
		"Shin to Shin Guard",
		NodeKind::Position,
		"Wrap the left arm over the opponent's right knee pit, place your shin \
		 across his shin, control the far ankle and off-balance.",
	);
	seed_node(
		&mut state,
		"node-stand-up",
		Point::new(420.0, -120.0),
		"Opponent Tries to Stand",
		NodeKind::Reaction,
		"Opponent postures up or attempts to disengage.",
	);
	seed_node(
		&mut state,
		"node-slx",
		Point::new(420.0, 120.0),
		"Single Leg X",
		NodeKind::Position,
		"Transition to SLX by elevating the leg and controlling the ankle.",
	);
	seed_node(
		&mut state,
		"node-sweep",
		Point::new(840.0, -120.0),
		"Technical Stand-Up Sweep",
		NodeKind::Action,
		"Stand up with the leg, drive forward, and finish the sweep.",
	);

	// Going through add_connection keeps the edge/connection mirror intact.
	state.add_connection(
		"node-shin-to-shin",
		"node-stand-up",
		Some("if opponent tries to stand".to_string()),
	);
	state.add_connection(
		"node-shin-to-shin",
		"node-slx",
		Some("off-balance forward".to_string()),
	);
	state.add_connection(
		"node-stand-up",
		"node-sweep",
		Some("follow up".to_string()),
	);

	state
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_graph_satisfies_the_mirror_invariant() {
		let state = sample_graph();

		assert_eq!(state.nodes.len(), 4);
		assert_eq!(state.edges.len(), 3);
		for edge in &state.edges {
			let source = state.node(&edge.source).expect("source exists");
			let mirror = source
				.data
				.connections
				.iter()
				.find(|c| c.id == edge.id)
				.expect("mirror exists");
			assert_eq!(mirror.target_node_id, edge.target);
			assert_eq!(mirror.description, edge.label);
		}
	}

	#[test]
	fn sample_graph_starts_with_nothing_selected() {
		assert_eq!(sample_graph().selected_node_id, None);
	}
}
