use leptos::prelude::*;

/// Free-text body editor. Receives the staged content and reports every
/// keystroke back through `on_change`; the text itself is opaque here.
#[component]
pub fn DescriptionEditor(
	#[prop(into)] content: Signal<String>,
	#[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
	view! {
		<div class="field description-editor">
			<label>"Description"</label>
			<p class="field-hint">"Start with anything, a note, reminder, or detail."</p>
			<textarea
				prop:value=move || content.get()
				placeholder="Enter text or details here..."
				on:input=move |ev| on_change.run(event_target_value(&ev))
			/>
		</div>
	}
}
