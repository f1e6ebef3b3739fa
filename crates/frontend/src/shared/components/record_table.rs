use contracts::domain::common::{Align, RecordId, Resource};
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;

fn align_class(align: Align) -> &'static str {
    match align {
        Align::Left => "table__cell",
        Align::Right => "table__cell table__cell--right",
        Align::Center => "table__cell table__cell--center",
    }
}

/// Current page of records as a flat table, with optional edit/delete actions per row.
#[component]
pub fn RecordTable<R: Resource>(
    #[prop(into)]
    rows: Signal<Vec<R>>,
    /// Applied search text, highlighted in the cells
    #[prop(into)]
    search: Signal<String>,
    #[prop(into)]
    loading: Signal<bool>,
    #[prop(optional_no_strip)]
    on_edit: Option<Callback<RecordId>>,
    #[prop(optional_no_strip)]
    on_delete: Option<Callback<RecordId>>,
) -> impl IntoView {
    let columns = R::columns();
    let has_actions = on_edit.is_some() || on_delete.is_some();
    let colspan = (columns.len() + usize::from(has_actions)).to_string();

    let body = move || {
        let rows = rows.get();
        if rows.is_empty() {
            let colspan = colspan.clone();
            return if loading.get() {
                view! {
                    <tr>
                        <td class="table__cell table__cell--empty" colspan=colspan>
                            <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                                <Spinner />
                                "Cargando..."
                            </Flex>
                        </td>
                    </tr>
                }
                .into_any()
            } else {
                view! {
                    <tr>
                        <td class="table__cell table__cell--empty" colspan=colspan>
                            "No hay registros para mostrar"
                        </td>
                    </tr>
                }
                .into_any()
            };
        }

        let needle = search.get();
        rows.into_iter()
            .map(|record| {
                let id = record.record_id();
                let cells = record
                    .cells()
                    .into_iter()
                    .zip(columns.iter())
                    .map(|(text, column)| {
                        view! { <td class=align_class(column.align)>{highlight_matches(&text, &needle)}</td> }
                    })
                    .collect_view();
                let actions = has_actions.then(|| view! {
                    <td class="table__cell table__cell--actions">
                        {on_edit.map(|on_edit| view! {
                            <button class="button button--icon" title="Editar" on:click=move |_| on_edit.run(id)>
                                {icon("edit")}
                            </button>
                        })}
                        {on_delete.map(|on_delete| view! {
                            <button class="button button--icon button--danger" title="Eliminar" on:click=move |_| on_delete.run(id)>
                                {icon("delete")}
                            </button>
                        })}
                    </td>
                });
                view! {
                    <tr class="table__row" data-id=id.as_string()>
                        {cells}
                        {actions}
                    </tr>
                }
                .into_any()
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {columns.iter().map(|column| view! {
                            <th class=format!("table__header-cell {}", align_class(column.align))>{column.title}</th>
                        }).collect_view()}
                        {has_actions.then(|| view! { <th class="table__header-cell table__header-cell--actions">"Acciones"</th> })}
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}
