use leptos::prelude::*;

use super::connections::ConnectionsSection;
use super::session::{self, EditBuffer, ModalMode};
use crate::components::description_editor::DescriptionEditor;
use crate::helpers;
use crate::store::{NodeKind, use_graph_store};

/// Modal editor for the currently selected node.
///
/// Keyed on the selection: switching to another node rebuilds the editor
/// panel and its staged buffer, while store mutations during the session
/// (immediate connection edits) leave the panel and its staging alone.
#[component]
pub fn NodeEditModal() -> impl IntoView {
	let store = use_graph_store();

	let mode =
		Memo::new(move |_| store.with(|s| session::resolve(s.selected_node_id.as_deref(), s)));

	view! {
		{move || match mode.get() {
			ModalMode::Hidden => ().into_any(),
			ModalMode::Missing(id) => view! { <MissingNodePanel id=id /> }.into_any(),
			ModalMode::Editor(id) => view! { <EditorPanel node_id=id /> }.into_any(),
		}}
	}
}

#[component]
fn EditorPanel(node_id: String) -> impl IntoView {
	let store = use_graph_store();

	let seed = store
		.with_untracked(|s| s.node(&node_id).map(EditBuffer::from_node))
		.unwrap_or_else(|| EditBuffer::empty(&node_id));

	// Staged until save; discarded when the panel goes away.
	let label = RwSignal::new(seed.label);
	let kind = RwSignal::new(seed.kind);
	let content = RwSignal::new(seed.content);
	let youtube_url = RwSignal::new(seed.youtube_url);
	let connections = RwSignal::new(seed.connections);

	let thumbnail = Memo::new(move |_| {
		youtube_url.with(|url| helpers::youtube_video_id(url.trim()).map(|id| helpers::youtube_thumb(&id)))
	});

	let touching = {
		let node_id = node_id.clone();
		Memo::new(move |_| store.with(|s| s.edges_touching(&node_id).len()))
	};

	let on_close = move |_| store.close_node_modal();

	let save_id = node_id.clone();
	let on_save = move |_| {
		let buffer = EditBuffer {
			node_id: save_id.clone(),
			label: label.get_untracked(),
			kind: kind.get_untracked(),
			content: content.get_untracked(),
			youtube_url: youtube_url.get_untracked(),
			connections: connections.get_untracked(),
		};
		store.update_node_data(&save_id, buffer.into_patch());
		store.close_node_modal();
	};

	let delete_id = node_id.clone();
	let on_delete = Callback::new(move |_: ()| {
		store.delete_node(&delete_id);
		store.close_node_modal();
	});

	view! {
		<div class="modal-overlay" role="dialog" aria-modal="true">
			<button
				type="button"
				class="modal-backdrop"
				aria-label="Close modal"
				on:click=on_close
			/>

			<div class="modal-panel">
				<div class="modal-head">
					<div>
						<div class="modal-title">"Edit Node"</div>
						<div class="modal-id">"ID: " {node_id.clone()}</div>
					</div>
					<button type="button" on:click=on_close>
						"✕"
					</button>
				</div>

				<div class="field">
					<label>"Title"</label>
					<input
						prop:value=move || label.get()
						placeholder="Untitled"
						on:input=move |ev| label.set(event_target_value(&ev))
					/>
				</div>

				<div class="field">
					<label>"Type"</label>
					<select on:change=move |ev| kind.set(NodeKind::parse(&event_target_value(&ev)))>
						{NodeKind::ALL
							.iter()
							.copied()
							.map(|option| {
								view! {
									<option
										value=option.label()
										selected=move || kind.get() == option
									>
										{option.label()}
									</option>
								}
							})
							.collect_view()}
					</select>
				</div>

				<DescriptionEditor
					content=content
					on_change=Callback::new(move |text| content.set(text))
				/>

				<div class="field">
					<label>"YouTube URL"</label>
					<input
						prop:value=move || youtube_url.get()
						placeholder="https://www.youtube.com/watch?v=..."
						on:input=move |ev| youtube_url.set(event_target_value(&ev))
					/>
					{move || {
						thumbnail
							.get()
							.map(|src| view! { <img class="video-thumb" src=src alt="Video thumbnail" /> })
					}}
				</div>

				<ConnectionsSection node_id=node_id.clone() connections=connections />

				<DeleteNodeSection connection_count=touching on_delete=on_delete />

				<div class="modal-actions">
					<button type="button" on:click=on_close>
						"Cancel"
					</button>
					<button type="button" class="primary" on:click=on_save>
						"Save"
					</button>
				</div>
			</div>
		</div>
	}
}

/// Danger-zone block: shows how many edges will cascade and asks for
/// confirmation before running the delete callback.
#[component]
fn DeleteNodeSection(
	connection_count: Memo<usize>,
	#[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
	let handle_delete = move |_| {
		let count = connection_count.get_untracked();
		let message = if count > 0 {
			format!("This node has {count} connection(s) that will be deleted. Are you sure?")
		} else {
			"Are you sure you want to delete this node?".to_string()
		};
		let confirmed = web_sys::window()
			.map(|w| w.confirm_with_message(&message).unwrap_or(false))
			.unwrap_or(false);
		if confirmed {
			on_delete.run(());
		}
	};

	view! {
		<div class="danger-zone">
			<p class="danger-title">"Danger Zone"</p>
			<p class="danger-text">
				"Deleting this node will permanently remove it and all its connections."
			</p>
			<Show when=move || { connection_count.get() > 0 }>
				<p class="danger-count">
					{move || connection_count.get()}
					" connection(s) will be deleted with it."
				</p>
			</Show>
			<button type="button" class="danger" on:click=handle_delete>
				"Delete Node"
			</button>
		</div>
	}
}

/// Rendered when the selection no longer resolves, e.g. the node was
/// deleted from the canvas while the modal was conceptually open.
#[component]
fn MissingNodePanel(id: String) -> impl IntoView {
	let store = use_graph_store();
	let on_close = move |_| store.close_node_modal();

	view! {
		<div class="modal-overlay" role="dialog" aria-modal="true">
			<button
				type="button"
				class="modal-backdrop"
				aria-label="Close modal"
				on:click=on_close
			/>
			<div class="modal-panel">
				<div class="modal-title">"Node not found"</div>
				<p class="modal-error">
					"The node " <code>{id}</code> " no longer exists. It may have been deleted from the canvas."
				</p>
				<div class="modal-actions">
					<button type="button" on:click=on_close>
						"Close"
					</button>
				</div>
			</div>
		</div>
	}
}
