use leptos::prelude::*;

/// Native date picker bound to a `YYYY-MM-DD` string; empty means unset.
#[component]
pub fn DateInput(
    #[prop(into)]
    value: Signal<String>,
    on_change: impl Fn(String) + 'static,
    #[prop(optional)]
    id: Option<&'static str>,
) -> impl IntoView {
    view! {
        <input
            id=id
            type="date"
            class="form__input form__input--date"
            prop:value=value
            on:input=move |ev| {
                on_change(event_target_value(&ev));
            }
        />
    }
}
