//! List page shared by every resource: fetch once, filter and page on the
//! client, edit in a modal form, delete after confirmation.

use std::collections::BTreeMap;
use std::future::Future;

use contracts::domain::common::{FilterOptions, HasRecordId, RecordId, Resource};
use contracts::shared::error::ApiError;
use contracts::shared::form::{json_body, DeleteFlow, FormController, ModalPhase, SavedRecord};
use contracts::shared::list_view::{distinct_values, Filterable, ListAction, ListController};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api_client;
use crate::shared::api_utils::alert;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::filter_bar::FilterBar;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::record_form::{field_dom_id, RecordForm};
use crate::shared::components::record_table::RecordTable;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::modal::{focus_later, Modal};

/// Runs one list fetch under a fresh ticket. A result overtaken by a newer
/// load is dropped, success or failure alike.
pub fn load_list<T, Fut>(
    list: RwSignal<ListController<T>>,
    load_error: RwSignal<Option<String>>,
    label: &'static str,
    fetch: Fut,
) where
    T: Filterable + HasRecordId + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let Some(ticket) = list.try_update(|l| l.begin_load()) else {
        return;
    };
    spawn_local(async move {
        match fetch.await {
            Ok(records) => {
                let count = records.len();
                let applied = list
                    .try_update(|l| l.finish_load(ticket, records))
                    .unwrap_or(false);
                if applied {
                    log::debug!("{}: {} records loaded", label, count);
                    load_error.set(None);
                } else {
                    log::debug!("{}: stale response dropped", label);
                }
            }
            Err(e) => {
                let current = list.try_update(|l| l.fail_load(ticket)).unwrap_or(false);
                if current {
                    log::error!("{}: load failed: {}", label, e);
                    load_error.set(Some(e.to_string()));
                } else {
                    log::debug!("{}: stale failure dropped: {}", label, e);
                }
            }
        }
    });
}

/// Page state. Signals are `Copy`, so the handlers below are too.
pub struct ResourcePageState<R: Resource> {
    pub list: RwSignal<ListController<R>>,
    pub form: RwSignal<FormController>,
    pub deletion: RwSignal<DeleteFlow>,
    pub load_error: RwSignal<Option<String>>,
}

impl<R: Resource> Clone for ResourcePageState<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for ResourcePageState<R> {}

impl<R: Resource> ResourcePageState<R> {
    pub fn new() -> Self {
        let cfg = config();
        Self {
            list: RwSignal::new(ListController::new(cfg.list.page_size, cfg.list.window_radius)),
            form: RwSignal::new(FormController::new(R::form_fields())),
            deletion: RwSignal::new(DeleteFlow::default()),
            load_error: RwSignal::new(None),
        }
    }

    /// Fetches the whole collection.
    pub fn load(self) {
        load_list(self.list, self.load_error, R::PATH, api_client::fetch_list::<R>());
    }

    pub fn dispatch(self, action: ListAction) {
        self.list.update(|l| l.dispatch(action));
    }

    pub fn open_new(self) {
        self.form.update(|f| f.open_new());
    }

    pub fn open_edit(self, id: RecordId) {
        let Some(id) = self.form.try_update(|f| f.open_edit(id)) else {
            return;
        };
        spawn_local(async move {
            match api_client::fetch_detail::<R>(id).await {
                Ok(detail) => {
                    let applied = self
                        .form
                        .try_update(|f| f.detail_loaded(id, &detail))
                        .unwrap_or(false);
                    if !applied {
                        log::debug!("{}: detail {} arrived after the modal moved on", R::PATH, id);
                    }
                }
                Err(e) => {
                    log::error!("{}: detail {} failed: {}", R::PATH, id, e);
                    self.form.update(|f| f.detail_failed(id, e.to_string()));
                }
            }
        });
    }

    pub fn close_form(self) {
        let closed = self.form.try_update(|f| f.close()).unwrap_or(false);
        if !closed {
            log::debug!("{}: close ignored while saving", R::PATH);
        }
    }

    pub fn submit(self) {
        let request = match self.form.try_update(|f| f.submit()) {
            Some(Ok(request)) => request,
            Some(Err(blocked)) => {
                log::debug!("{}: submit blocked: {}", R::PATH, blocked);
                return;
            }
            None => return,
        };
        spawn_local(async move {
            match api_client::save::<R>(&request).await {
                Ok(backend_id) => {
                    if let Some(saved) = self.form.try_update(|f| f.save_succeeded(backend_id)).flatten() {
                        log::info!("{}: saved {:?}", R::PATH, saved.id);
                        self.apply_saved(saved);
                    }
                }
                Err(e) => {
                    log::warn!("{}: save rejected: {}", R::PATH, e);
                    self.form.update(|f| f.save_failed(e));
                }
            }
        });
    }

    /// Patches the saved row into the list, or reloads when the row cannot be rebuilt locally.
    fn apply_saved(self, saved: SavedRecord) {
        let rebuilt = saved.id.and_then(|id| {
            serde_json::from_value::<R>(json_body(R::form_fields(), &saved.values, Some(id))).ok()
        });
        match rebuilt {
            Some(record) => self.list.update(|l| l.upsert(record)),
            None => self.load(),
        }
    }

    pub fn arm_delete(self, id: RecordId) {
        self.deletion.update(|d| d.arm(id));
    }

    pub fn dismiss_delete(self) {
        self.deletion.update(|d| d.dismiss());
    }

    pub fn confirm_delete(self) {
        let Some(id) = self.deletion.try_update(|d| d.confirm()).flatten() else {
            return;
        };
        spawn_local(async move {
            match api_client::delete::<R>(id).await {
                Ok(()) => {
                    log::info!("{}: deleted {}", R::PATH, id);
                    self.deletion.update(|d| {
                        d.completed();
                    });
                    self.list.update(|l| {
                        l.remove(id);
                    });
                }
                Err(e) => {
                    log::warn!("{}: delete {} failed: {}", R::PATH, id, e);
                    self.deletion.update(|d| d.failed());
                    alert(&e.to_string());
                }
            }
        });
    }
}

impl<R: Resource> Default for ResourcePageState<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn modal_title<R: Resource>(phase: ModalPhase) -> String {
    match phase.editing() {
        Some(_) => format!("Editar {}", R::SINGULAR),
        None => format!("Nuevo {}", R::SINGULAR),
    }
}

/// Full list page for `R`.
pub fn resource_list_page<R: Resource>() -> impl IntoView {
    let state = ResourcePageState::<R>::new();
    let editable = !R::form_fields().is_empty();
    let id_prefix = R::COLLECTION_KEY;

    // Focus requests and alerts are one-shot: take them right after each form change.
    Effect::new(move |_| {
        state.form.track();
        let (focus, message) = state
            .form
            .try_update_untracked(|f| (f.take_focus(), f.take_alert()))
            .unwrap_or((None, None));
        if let Some(name) = focus {
            focus_later(field_dom_id(id_prefix, name));
        }
        if let Some(message) = message {
            alert(&message);
        }
    });

    let view_state = Signal::derive(move || state.list.with(|l| l.view()));
    let filter = Signal::derive(move || state.list.with(|l| l.filter().clone()));
    let data_options = Signal::derive(move || {
        state.list.with(|l| {
            R::enum_filters()
                .iter()
                .filter(|def| def.options == FilterOptions::FromData)
                .map(|def| (def.name, distinct_values(l.records(), def.name)))
                .collect::<BTreeMap<_, _>>()
        })
    });
    let loading = Signal::derive(move || state.list.with(|l| l.is_loading()));
    let on_action = Callback::new(move |action: ListAction| state.dispatch(action));

    let on_edit = editable.then(|| Callback::new(move |id: RecordId| state.open_edit(id)));
    let on_delete = R::CAN_DELETE.then(|| Callback::new(move |id: RecordId| state.arm_delete(id)));

    state.load();

    view! {
        <div class="page">
            <PageHeader title=R::TITLE>
                {editable.then(|| view! {
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| state.open_new()>
                        {icon("plus")}
                        {format!(" Nuevo {}", R::SINGULAR)}
                    </Button>
                })}
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| state.load()
                    disabled=loading
                >
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            {move || state.load_error.get().map(|e| view! {
                <div class="alert alert--error">{e}</div>
            })}

            <FilterBar
                filter=filter
                defs=R::enum_filters()
                data_options=data_options
                on_action=on_action
            />

            <RecordTable<R>
                rows=Signal::derive(move || view_state.with(|v| v.rows.clone()))
                search=Signal::derive(move || filter.with(|f| f.text.clone()))
                loading=loading
                on_edit=on_edit
                on_delete=on_delete
            />

            <PaginationControls
                model=Signal::derive(move || view_state.with(|v| v.pagination.clone()))
                range=Signal::derive(move || view_state.with(|v| v.range))
                page_size=Signal::derive(move || filter.with(|f| f.page_size))
                on_page_change=Callback::new(move |page: usize| state.dispatch(ListAction::GoToPage(page)))
                on_page_size_change=Callback::new(move |size: usize| state.dispatch(ListAction::SetPageSize(size)))
                page_size_options=config().page_size_options()
            />

            <Show when=move || state.form.with(|f| f.phase().is_open())>
                <Modal
                    title=Signal::derive(move || state.form.with(|f| modal_title::<R>(f.phase())))
                    on_close=Callback::new(move |_| state.close_form())
                    footer=move || view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| state.close_form()
                            disabled=Signal::derive(move || state.form.with(|f| f.is_submitting()))
                        >
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| state.submit()
                            disabled=Signal::derive(move || {
                                state.form.with(|f| {
                                    matches!(f.phase(), ModalPhase::FetchingDetail(_) | ModalPhase::Submitting(_))
                                })
                            })
                        >
                            {move || if state.form.with(|f| f.is_submitting()) { "Guardando..." } else { "Guardar" }}
                        </Button>
                    }
                >
                    <RecordForm form=state.form id_prefix=id_prefix />
                </Modal>
            </Show>

            <Show when=move || state.deletion.with(|d| d.pending().is_some())>
                <ConfirmDialog
                    message=Signal::derive(move || {
                        format!("¿Está seguro de eliminar este {}? Esta acción no se puede deshacer.", R::SINGULAR)
                    })
                    busy=Signal::derive(move || state.deletion.with(|d| d.is_in_flight()))
                    on_confirm=Callback::new(move |_| state.confirm_delete())
                    on_dismiss=Callback::new(move |_| state.dismiss_delete())
                />
            </Show>
        </div>
    }
}
