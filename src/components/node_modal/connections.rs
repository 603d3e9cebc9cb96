use leptos::prelude::*;

use super::session;
use crate::store::{Connection, use_graph_store};

fn normalize(text: String) -> Option<String> {
	let trimmed = text.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Outgoing connections of the node being edited: a list with inline
/// description editing and removal, plus an add form.
///
/// Connection edits go to the store immediately and the store's list is
/// mirrored back into `connections`, so the canvas and the modal stay in
/// agreement while the rest of the session remains staged.
#[component]
pub fn ConnectionsSection(
	node_id: String,
	connections: RwSignal<Vec<Connection>>,
) -> impl IntoView {
	let store = use_graph_store();

	let available = {
		let node_id = node_id.clone();
		Memo::new(move |_| store.with(|s| s.available_targets(&node_id)))
	};

	let show_form = RwSignal::new(false);
	let target = RwSignal::new(String::new());
	let description = RwSignal::new(String::new());

	let add_id = node_id.clone();
	let on_add = Callback::new(move |_| {
		let chosen = target.get_untracked();
		if chosen.is_empty() {
			if let Some(window) = web_sys::window() {
				let _ = window.alert_with_message("Please select a target node");
			}
			return;
		}
		store.add_connection(&add_id, &chosen, normalize(description.get_untracked()));
		connections.set(store.with_untracked(|s| session::mirror_connections(s, &add_id)));
		target.set(String::new());
		description.set(String::new());
		show_form.set(false);
	});

	let rows_id = node_id.clone();
	let rows = move || {
		let node_id = rows_id.clone();
		connections
			.get()
			.into_iter()
			.map(|connection| {
				let target_label = store.with(|s| s.node_label(&connection.target_node_id));
				let desc_value = connection.description.clone().unwrap_or_default();
				let update_node = node_id.clone();
				let update_id = connection.id.clone();
				let delete_node = node_id.clone();
				let delete_id = connection.id.clone();
				view! {
					<li class="connection-row">
						<span class="connection-target">{target_label}</span>
						<input
							prop:value=desc_value
							placeholder="Describe the transition..."
							on:change=move |ev| {
								store.update_connection(
									&update_node,
									&update_id,
									normalize(event_target_value(&ev)),
								);
								connections.set(store.with_untracked(|s| {
									session::mirror_connections(s, &update_node)
								}));
							}
						/>
						<button
							type="button"
							on:click=move |_| {
								store.delete_connection(&delete_node, &delete_id);
								connections.set(store.with_untracked(|s| {
									session::mirror_connections(s, &delete_node)
								}));
							}
						>
							"Remove"
						</button>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<div class="connections-section">
			<div class="section-head">
				<label>"Connections"</label>
				<button type="button" on:click=move |_| show_form.update(|v| *v = !*v)>
					{move || if show_form.get() { "Close" } else { "Add Connection" }}
				</button>
			</div>

			<Show when=move || show_form.get()>
				<div class="add-connection-form">
					<label>"Target Node"</label>
					<select on:change=move |ev| target.set(event_target_value(&ev))>
						<option value="">"Select a node..."</option>
						{move || {
							let chosen = target.get();
							available
								.get()
								.into_iter()
								.map(|node| {
									let value = node.id.clone();
									let selected = node.id == chosen;
									view! {
										<option value=value selected=selected>
											{node.display_label().to_string()}
										</option>
									}
								})
								.collect_view()
						}}
					</select>

					<label>"Description (optional)"</label>
					<input
						prop:value=move || description.get()
						placeholder="e.g. 'follow up', 'if opponent resists'..."
						on:input=move |ev| description.set(event_target_value(&ev))
					/>

					<div class="form-actions">
						<button
							type="button"
							on:click=move |_| {
								show_form.set(false);
								target.set(String::new());
								description.set(String::new());
							}
						>
							"Cancel"
						</button>
						<button type="button" class="primary" on:click=move |ev| on_add.run(ev)>
							"Add Connection"
						</button>
					</div>
				</div>
			</Show>

			<Show when=move || connections.with(|c| c.is_empty())>
				<p class="connection-empty">"No outgoing connections yet."</p>
			</Show>
			<ul class="connection-list">{rows}</ul>
		</div>
	}
}
