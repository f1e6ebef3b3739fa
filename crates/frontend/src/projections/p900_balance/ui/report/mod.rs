use chrono::NaiveDate;
use contracts::domain::a007_ejercicio::aggregate::Ejercicio;
use contracts::domain::a008_cuenta_contable::plan::indent_px;
use contracts::domain::common::RecordId;
use contracts::projections::p900_balance::dto::{BalanceQuery, BalanceReport, BalanceRow};
use contracts::shared::format::{format_date, format_money};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::projections::p900_balance::api;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;

#[derive(Clone, Copy)]
struct QueryForm {
    ejercicio_id: RwSignal<String>,
    fecha_desde: RwSignal<String>,
    fecha_hasta: RwSignal<String>,
    nivel: RwSignal<String>,
    solo_con_movimientos: RwSignal<bool>,
    incluir_subtotales: RwSignal<bool>,
}

impl QueryForm {
    fn new() -> Self {
        Self {
            ejercicio_id: RwSignal::new(String::new()),
            fecha_desde: RwSignal::new(String::new()),
            fecha_hasta: RwSignal::new(String::new()),
            nivel: RwSignal::new(String::new()),
            solo_con_movimientos: RwSignal::new(false),
            incluir_subtotales: RwSignal::new(true),
        }
    }

    /// Dates follow the selected ejercicio until the user changes them.
    fn select_ejercicio(&self, ejercicio: &Ejercicio) {
        self.ejercicio_id.set(ejercicio.id.as_string());
        self.fecha_desde.set(ejercicio.fecha_inicio.to_string());
        self.fecha_hasta.set(ejercicio.fecha_fin.to_string());
    }

    fn build(&self) -> Result<BalanceQuery, String> {
        let ejercicio_id = self
            .ejercicio_id
            .get_untracked()
            .parse::<RecordId>()
            .map_err(|_| "Seleccione un ejercicio".to_string())?;
        let mut query = BalanceQuery::new(ejercicio_id);
        query.fecha_desde = parse_date(&self.fecha_desde.get_untracked())?;
        query.fecha_hasta = parse_date(&self.fecha_hasta.get_untracked())?;
        let nivel = self.nivel.get_untracked();
        query.nivel = match nivel.trim() {
            "" => None,
            raw => Some(raw.parse::<u32>().map_err(|_| "Nivel inválido".to_string())?),
        };
        query.solo_con_movimientos = self.solo_con_movimientos.get_untracked();
        query.incluir_subtotales = self.incluir_subtotales.get_untracked();
        query.validate()?;
        Ok(query)
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    match raw.trim() {
        "" => Ok(None),
        raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Fecha inválida: {}", raw)),
    }
}

/// Open ejercicio covering today, else the most recent one.
fn default_ejercicio(ejercicios: &[Ejercicio]) -> Option<&Ejercicio> {
    let today = chrono::Utc::now().date_naive();
    ejercicios
        .iter()
        .find(|e| !e.cerrado && e.contains(today))
        .or_else(|| ejercicios.iter().max_by_key(|e| e.fecha_inicio))
}

fn row_view(row: BalanceRow) -> impl IntoView {
    let indent = format!("padding-left: {}px;", indent_px(row.nivel));
    view! {
        <tr class="table__row" class:table__row--subtotal=row.es_subtotal>
            <td class="table__cell">{row.codigo}</td>
            <td class="table__cell"><span style=indent>{row.nombre}</span></td>
            <td class="table__cell table__cell--right">{format_money(row.saldo_anterior)}</td>
            <td class="table__cell table__cell--right">{format_money(row.debe)}</td>
            <td class="table__cell table__cell--right">{format_money(row.haber)}</td>
            <td class="table__cell table__cell--right">{format_money(row.saldo)}</td>
        </tr>
    }
}

/// Balance de sumas y saldos for an ejercicio
#[component]
#[allow(non_snake_case)]
pub fn BalanceReportPage() -> impl IntoView {
    let form = QueryForm::new();
    let ejercicios = RwSignal::new(Vec::<Ejercicio>::new());
    let report = RwSignal::new(None::<BalanceReport>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    // Only the newest request may fill the table.
    let generation = StoredValue::new(0u64);

    spawn_local(async move {
        match api::fetch_ejercicios().await {
            Ok(list) => {
                if let Some(selected) = default_ejercicio(&list) {
                    form.select_ejercicio(selected);
                }
                ejercicios.set(list);
            }
            Err(e) => {
                log::error!("balance: ejercicios failed: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    });

    let run_query = move || {
        let query = match form.build() {
            Ok(query) => query,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };
        generation.update_value(|g| *g += 1);
        let mine = generation.get_value();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_balance(&query).await;
            if generation.get_value() != mine {
                log::debug!("balance: stale response dropped");
                return;
            }
            set_loading.set(false);
            match result {
                Ok(data) => {
                    if !data.totales.is_balanced() {
                        log::warn!(
                            "balance: debe {} and haber {} differ",
                            data.totales.debe,
                            data.totales.haber
                        );
                    }
                    report.set(Some(data));
                }
                Err(e) => {
                    log::error!("balance: query failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let export = move || match form.build() {
        Ok(query) => {
            if let Err(e) = api::export_excel(&query) {
                set_error.set(Some(e.to_string()));
            }
        }
        Err(message) => set_error.set(Some(message)),
    };

    let on_ejercicio_change = move |value: String| {
        let selected = ejercicios.with(|list| {
            list.iter().find(|e| e.id.as_string() == value).cloned()
        });
        match selected {
            Some(ejercicio) => form.select_ejercicio(&ejercicio),
            None => form.ejercicio_id.set(value),
        }
    };

    view! {
        <div class="page">
            <PageHeader
                title="Balance de sumas y saldos"
                subtitle=Signal::derive(move || {
                    let id = form.ejercicio_id.get();
                    ejercicios.with(|list| {
                        list.iter().find(|e| e.id.as_string() == id).map(|e| {
                            format!("{} ({} – {})", e.descripcion, format_date(e.fecha_inicio), format_date(e.fecha_fin))
                        })
                    })
                })
            >
                <Button appearance=ButtonAppearance::Primary on_click=move |_| run_query() disabled=loading>
                    {icon("refresh")}
                    {move || if loading.get() { " Consultando..." } else { " Consultar" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| export()>
                    {icon("download")}
                    " Exportar Excel"
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <label class="filter-bar__select">
                    <span>"Ejercicio"</span>
                    <select
                        prop:value=move || form.ejercicio_id.get()
                        on:change=move |ev| on_ejercicio_change(event_target_value(&ev))
                    >
                        <option value="">"Seleccione..."</option>
                        {move || ejercicios.get().into_iter().map(|e| {
                            let value = e.id.as_string();
                            let selected = value == form.ejercicio_id.get_untracked();
                            view! { <option value=value selected=selected>{e.descripcion}</option> }
                        }).collect_view()}
                    </select>
                </label>
                <label class="filter-bar__select">
                    <span>"Desde"</span>
                    <DateInput value=form.fecha_desde on_change=move |v: String| form.fecha_desde.set(v) />
                </label>
                <label class="filter-bar__select">
                    <span>"Hasta"</span>
                    <DateInput value=form.fecha_hasta on_change=move |v: String| form.fecha_hasta.set(v) />
                </label>
                <label class="filter-bar__select">
                    <span>"Nivel"</span>
                    <select
                        prop:value=move || form.nivel.get()
                        on:change=move |ev| form.nivel.set(event_target_value(&ev))
                    >
                        <option value="">"Todos"</option>
                        {(1..=6).map(|n| view! { <option value=n.to_string()>{n.to_string()}</option> }).collect_view()}
                    </select>
                </label>
                <label class="filter-bar__check">
                    <input
                        type="checkbox"
                        prop:checked=move || form.solo_con_movimientos.get()
                        on:change=move |ev| form.solo_con_movimientos.set(event_target_checked(&ev))
                    />
                    " Solo con movimientos"
                </label>
                <label class="filter-bar__check">
                    <input
                        type="checkbox"
                        prop:checked=move || form.incluir_subtotales.get()
                        on:change=move |ev| form.incluir_subtotales.set(event_target_checked(&ev))
                    />
                    " Incluir subtotales"
                </label>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Código"</th>
                            <th class="table__header-cell">"Cuenta"</th>
                            <th class="table__header-cell table__cell--right">"Saldo anterior"</th>
                            <th class="table__header-cell table__cell--right">"Debe"</th>
                            <th class="table__header-cell table__cell--right">"Haber"</th>
                            <th class="table__header-cell table__cell--right">"Saldo"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || match report.get() {
                            None => view! {
                                <tr><td class="table__cell table__cell--empty" colspan="6">
                                    {if loading.get() { "Consultando..." } else { "Elija los parámetros y presione Consultar" }}
                                </td></tr>
                            }.into_any(),
                            Some(data) if data.cuentas.is_empty() => view! {
                                <tr><td class="table__cell table__cell--empty" colspan="6">"Sin movimientos en el período"</td></tr>
                            }.into_any(),
                            Some(data) => data.cuentas.into_iter().map(row_view).collect_view().into_any(),
                        }}
                    </tbody>
                    <tfoot>
                        {move || report.with(|r| r.as_ref().map(|data| {
                            let totales = data.totales.clone();
                            view! {
                                <tr class="table__totals-row" class:table__totals-row--unbalanced=!totales.is_balanced()>
                                    <td class="table__cell" colspan="3">"Totales"</td>
                                    <td class="table__cell table__cell--right">{format_money(totales.debe)}</td>
                                    <td class="table__cell table__cell--right">{format_money(totales.haber)}</td>
                                    <td class="table__cell table__cell--right">{format_money(totales.saldo)}</td>
                                </tr>
                            }
                        }))}
                    </tfoot>
                </table>
            </div>
        </div>
    }
}
