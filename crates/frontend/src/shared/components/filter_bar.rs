use std::collections::BTreeMap;

use contracts::domain::common::{EnumFilterDef, FilterOptions};
use contracts::shared::list_view::{FilterState, ListAction, ALL};
use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;

/// Search box, one select per enum filter and "Limpiar filtros".
///
/// Every change leaves as a [`ListAction`]; the bar keeps no state of its own.
#[component]
pub fn FilterBar(
    #[prop(into)]
    filter: Signal<FilterState>,
    defs: &'static [EnumFilterDef],
    /// Options for `FilterOptions::FromData` filters, keyed by filter name
    #[prop(into)]
    data_options: Signal<BTreeMap<&'static str, Vec<String>>>,
    on_action: Callback<ListAction>,
) -> impl IntoView {
    let text = Signal::derive(move || filter.with(|f| f.text.clone()));

    view! {
        <div class="filter-bar">
            <SearchInput
                value=text
                on_change=Callback::new(move |value: String| on_action.run(ListAction::SetText(value)))
            />
            {defs.iter().map(|def| {
                let name = def.name;
                let selected = move || filter.with(|f| f.enum_value(name).to_string());
                let options = move || -> Vec<(String, String)> {
                    match def.options {
                        FilterOptions::Fixed(options) => options
                            .iter()
                            .map(|(value, label)| (value.to_string(), label.to_string()))
                            .collect(),
                        FilterOptions::FromData => {
                            let mut options = vec![(ALL.to_string(), "Todos".to_string())];
                            options.extend(
                                data_options
                                    .with(|m| m.get(name).cloned().unwrap_or_default())
                                    .into_iter()
                                    .map(|value| (value.clone(), value)),
                            );
                            options
                        }
                    }
                };
                view! {
                    <label class="filter-bar__select">
                        <span>{def.label}</span>
                        <select
                            prop:value=selected
                            on:change=move |ev| on_action.run(ListAction::SetEnum {
                                name: name.to_string(),
                                value: event_target_value(&ev),
                            })
                        >
                            {move || options().into_iter().map(|(value, label)| {
                                let is_selected = value == selected();
                                view! { <option value=value selected=is_selected>{label}</option> }
                            }).collect_view()}
                        </select>
                    </label>
                }
            }).collect_view()}
            <button
                class="button button--secondary"
                disabled=move || !filter.with(|f| f.is_active())
                on:click=move |_| on_action.run(ListAction::ClearFilters)
            >
                {icon("filter-x")}
                " Limpiar filtros"
            </button>
        </div>
    }
}
