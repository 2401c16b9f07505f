use leptos::prelude::*;

/// Code editor textarea. The value is bound as a DOM property so external
/// appends show up after the user has typed into the field.
#[component]
pub fn Textarea(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Textarea value
    #[prop(into)]
    value: Signal<String>,
    /// Input event handler
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Rows attribute
    #[prop(optional)]
    rows: Option<u32>,
) -> impl IntoView {
    let textarea_placeholder = move || placeholder.get().unwrap_or_default();
    let textarea_rows = rows.unwrap_or(6);

    view! {
        <label class="form__group">
            {move || label.get().map(|l| view! { <span class="form__label">{l}</span> })}
            <textarea
                class="form__textarea form__textarea--code"
                placeholder=textarea_placeholder
                rows=textarea_rows
                spellcheck="false"
                prop:value=move || value.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            ></textarea>
        </label>
    }
}
