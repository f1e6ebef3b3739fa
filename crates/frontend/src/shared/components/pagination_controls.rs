use contracts::shared::list_view::RangeSummary;
use contracts::shared::pagination::{PageLink, PaginationModel};
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Windowed page links, the per-page selector and the "start–end de total" counters.
///
/// The links are hidden entirely when everything fits on one page.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    model: Signal<Option<PaginationModel>>,
    #[prop(into)]
    range: Signal<RangeSummary>,
    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,
    /// Callback with the 1-based page number
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,
    page_size_options: Vec<usize>,
) -> impl IntoView {
    let links = move || {
        model.get().map(|model| {
            let prev = model.prev_page();
            let next = model.next_page();
            view! {
                <nav class="pagination-controls" aria-label="Paginación">
                    <button
                        class="pagination-btn"
                        disabled=prev.is_none()
                        on:click=move |_| {
                            if let Some(page) = prev {
                                on_page_change.run(page);
                            }
                        }
                        title="Página anterior"
                    >
                        {icon("chevron-left")}
                    </button>
                    {model.links.into_iter().map(|link| match link {
                        PageLink::Page { number, current } => view! {
                            <button
                                class="pagination-btn"
                                class:pagination-btn--current=current
                                aria-current=current.then_some("page")
                                on:click=move |_| on_page_change.run(number)
                            >
                                {number.to_string()}
                            </button>
                        }.into_any(),
                        PageLink::Ellipsis => view! {
                            <span class="pagination-ellipsis">"…"</span>
                        }.into_any(),
                    }).collect_view()}
                    <button
                        class="pagination-btn"
                        disabled=next.is_none()
                        on:click=move |_| {
                            if let Some(page) = next {
                                on_page_change.run(page);
                            }
                        }
                        title="Página siguiente"
                    >
                        {icon("chevron-right")}
                    </button>
                </nav>
            }
        })
    };

    view! {
        <div class="pagination">
            <span class="pagination-info">{move || range.get().to_string()}</span>
            {links}
            <label class="page-size">
                "Mostrar "
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            on_page_size_change.run(size);
                        }
                    }
                    prop:value=move || page_size.get().to_string()
                >
                    {page_size_options.into_iter().map(|size| view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }).collect_view()}
                </select>
            </label>
        </div>
    }
}
