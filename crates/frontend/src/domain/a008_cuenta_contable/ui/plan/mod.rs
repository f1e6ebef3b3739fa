use std::collections::BTreeMap;

use contracts::domain::a008_cuenta_contable::aggregate::CuentaContable;
use contracts::domain::a008_cuenta_contable::plan::{
    check_levels, flatten, CuentaRow, PLAN_COLLECTION_KEY, PLAN_FILTERS, PLAN_PATH,
};
use contracts::shared::error::ApiError;
use contracts::shared::format::yes_no;
use contracts::shared::list_view::{distinct_values, ListAction, ListController};
use leptos::prelude::*;
use thaw::*;

use crate::shared::api_client;
use crate::shared::components::filter_bar::FilterBar;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::resource_page::load_list;

async fn fetch_plan() -> Result<Vec<CuentaRow>, ApiError> {
    let forest: Vec<CuentaContable> = api_client::get_envelope(PLAN_PATH, Some(PLAN_COLLECTION_KEY))
        .await?
        .records()?;
    if let Err(mismatch) = check_levels(&forest) {
        log::warn!("plan de cuentas: {}", mismatch);
    }
    Ok(flatten(&forest))
}

fn row_view(row: CuentaRow, needle: &str) -> impl IntoView {
    let indent = format!("padding-left: {}px;", row.indent_px());
    let marker = if row.has_children { icon("folder-open") } else { icon("item") };
    view! {
        <tr class="table__row" class:table__row--group=!row.imputable data-id=row.id.as_string()>
            <td class="table__cell">
                <span class="plan__name" style=indent>
                    {marker}
                    {highlight_matches(&row.codigo, needle)}
                </span>
            </td>
            <td class="table__cell">{highlight_matches(&row.nombre, needle)}</td>
            <td class="table__cell">{row.tipo.label()}</td>
            <td class="table__cell table__cell--center">{row.nivel.to_string()}</td>
            <td class="table__cell table__cell--center">{yes_no(row.imputable)}</td>
        </tr>
    }
}

/// Plan de cuentas: the nested tree shown as an indented, filterable, paged table.
#[component]
#[allow(non_snake_case)]
pub fn PlanCuentas() -> impl IntoView {
    let cfg = config();
    let list = RwSignal::new(ListController::<CuentaRow>::new(
        cfg.list.page_size,
        cfg.list.window_radius,
    ));
    let error = RwSignal::new(None::<String>);
    let load = move || load_list(list, error, "plan de cuentas", fetch_plan());

    let view_state = Signal::derive(move || list.with(|l| l.view()));
    let filter = Signal::derive(move || list.with(|l| l.filter().clone()));
    let data_options = Signal::derive(move || {
        list.with(|l| BTreeMap::from([("nivel", distinct_values(l.records(), "nivel"))]))
    });
    let loading = Signal::derive(move || list.with(|l| l.is_loading()));
    let dispatch = move |action: ListAction| list.update(|l| l.dispatch(action));

    load();

    view! {
        <div class="page">
            <PageHeader title="Plan de cuentas">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load() disabled=loading>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <FilterBar
                filter=filter
                defs=PLAN_FILTERS
                data_options=data_options
                on_action=Callback::new(dispatch)
            />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Código"</th>
                            <th class="table__header-cell">"Nombre"</th>
                            <th class="table__header-cell">"Tipo"</th>
                            <th class="table__header-cell table__cell--center">"Nivel"</th>
                            <th class="table__header-cell table__cell--center">"Imputable"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = view_state.with(|v| v.rows.clone());
                            if rows.is_empty() {
                                let text = if loading.get() { "Cargando..." } else { "No hay cuentas para mostrar" };
                                view! {
                                    <tr><td class="table__cell table__cell--empty" colspan="5">{text}</td></tr>
                                }
                                .into_any()
                            } else {
                                let needle = filter.with(|f| f.text.clone());
                                rows.into_iter().map(|row| row_view(row, &needle)).collect_view().into_any()
                            }
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                model=Signal::derive(move || view_state.with(|v| v.pagination.clone()))
                range=Signal::derive(move || view_state.with(|v| v.range))
                page_size=Signal::derive(move || filter.with(|f| f.page_size))
                on_page_change=Callback::new(move |page: usize| dispatch(ListAction::GoToPage(page)))
                on_page_size_change=Callback::new(move |size: usize| dispatch(ListAction::SetPageSize(size)))
                page_size_options=cfg.page_size_options()
            />
        </div>
    }
}
