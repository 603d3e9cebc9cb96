use leptos::prelude::*;

use crate::components::graph_canvas::GraphCanvas;
use crate::components::node_modal::NodeEditModal;
use crate::store::{self, Point};

/// Default Home Page: the authoring canvas plus the node editor modal.
#[component]
pub fn Home() -> impl IntoView {
	// Seed the store with the sample technique flow and share it with
	// every component below.
	let store = store::provide_graph_store(store::sample_graph());

	let nodes = Signal::derive(move || store.nodes());
	let edges = Signal::derive(move || store.edges());

	let on_nodes_change = Callback::new(move |changes| store.apply_node_changes(changes));
	let on_edges_change = Callback::new(move |changes| store.apply_edge_changes(changes));
	let on_connect =
		Callback::new(move |(source, target): (String, String)| store.connect(&source, &target));
	let on_node_click = Callback::new(move |id: String| store.open_node_modal(&id));
	let on_add_node = Callback::new(move |position: Point| store.add_node(Some(position)));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<GraphCanvas
					nodes=nodes
					edges=edges
					on_nodes_change=on_nodes_change
					on_edges_change=on_edges_change
					on_connect=on_connect
					on_node_click=on_node_click
					on_add_node=on_add_node
				/>
				<div class="graph-overlay">
					<h1>"Technique Graph"</h1>
					<p class="subtitle">
						"Drag nodes to reposition. Shift-drag between nodes to connect. Double-click to add. Click a node to edit."
					</p>
					<div class="toolbar">
						<button type="button" on:click=move |_| store.add_node(None)>
							"Add Node"
						</button>
						<button type="button" on:click=move |_| store.clear()>
							"Clear"
						</button>
					</div>
				</div>
				<NodeEditModal />
			</div>
		</ErrorBoundary>
	}
}
