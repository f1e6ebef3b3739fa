use contracts::domain::common::{FieldKind, FormField};
use contracts::shared::form::{FormController, ModalPhase};
use leptos::prelude::*;

/// DOM id of a form input, also the focus target.
pub fn field_dom_id(prefix: &str, name: &str) -> String {
    format!("{}-{}", prefix, name)
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Integer => "number",
        FieldKind::Date => "date",
        // Decimals accept "1.234,56", which a number input would reject.
        _ => "text",
    }
}

/// Inputs of the modal form, bound to a [`FormController`].
#[component]
pub fn RecordForm(
    form: RwSignal<FormController>,
    /// Prefix for input ids, unique per page
    id_prefix: &'static str,
) -> impl IntoView {
    let fields = form.with_untracked(|f| f.fields());
    let locked = move || {
        form.with(|f| matches!(f.phase(), ModalPhase::FetchingDetail(_) | ModalPhase::Submitting(_)))
    };

    view! {
        <form class="form" on:submit=|ev| ev.prevent_default()>
            {move || form.with(|f| matches!(f.phase(), ModalPhase::FetchingDetail(_))).then(|| view! {
                <div class="form__loading">"Cargando datos..."</div>
            })}
            {fields.iter().map(|field| field_view(form, id_prefix, field, locked)).collect_view()}
        </form>
    }
}

fn field_view(
    form: RwSignal<FormController>,
    prefix: &'static str,
    field: &'static FormField,
    locked: impl Fn() -> bool + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let name = field.name;
    let dom_id = field_dom_id(prefix, name);
    let value = move || form.with(|f| f.value(name).to_string());
    let error = move || form.with(|f| f.error_for(name).map(str::to_string));
    let set = move |v: String| form.update(|f| f.set_value(name, v));

    let control = match field.kind {
        FieldKind::Bool => view! {
            <input
                id=dom_id.clone()
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || value() == "true"
                disabled=locked
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Choice(options) => view! {
            <select
                id=dom_id.clone()
                class="form__select"
                prop:value=value
                disabled=locked
                on:change=move |ev| set(event_target_value(&ev))
            >
                {(!field.required).then(|| view! { <option value="">"—"</option> })}
                {options.iter().map(|(v, label)| view! {
                    <option value=*v selected=move || value() == *v>{*label}</option>
                }).collect_view()}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                id=dom_id.clone()
                type=input_type(kind)
                class="form__input"
                class:form__input--invalid=move || error().is_some()
                prop:value=value
                disabled=locked
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label class="form__label" for=dom_id>
                {field.label}
                {field.required.then_some(" *")}
            </label>
            {control}
            {move || error().map(|message| view! { <div class="form__error">{message}</div> })}
        </div>
    }
}
