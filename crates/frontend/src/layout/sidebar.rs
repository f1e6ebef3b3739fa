//! Sidebar with collapsible menu groups

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (href, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "maestros",
            label: "Maestros",
            items: vec![
                ("/clientes", "Clientes", "clientes"),
                ("/rubros", "Rubros", "rubros"),
                ("/unidades", "Unidades", "unidades"),
                ("/localidades", "Localidades", "localidades"),
            ],
        },
        MenuGroup {
            id: "operaciones",
            label: "Operaciones",
            items: vec![
                ("/cheques", "Cheques", "cheques"),
                ("/presupuestos", "Presupuestos", "presupuestos"),
            ],
        },
        MenuGroup {
            id: "contabilidad",
            label: "Contabilidad",
            items: vec![
                ("/contabilidad/ejercicios", "Ejercicios", "ejercicios"),
                ("/contabilidad/plan-cuentas", "Plan de cuentas", "plan-cuentas"),
                ("/contabilidad/balance", "Balance", "balance"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let collapsed = RwSignal::new(Vec::<&'static str>::new());

    view! {
        <nav class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let id = group.id;
                let is_open = move || !collapsed.with(|c| c.contains(&id));
                view! {
                    <div class="app-sidebar__group">
                        <div
                            class="app-sidebar__group-title"
                            on:click=move |_| collapsed.update(|c| {
                                match c.iter().position(|x| *x == id) {
                                    Some(pos) => {
                                        c.remove(pos);
                                    }
                                    None => c.push(id),
                                }
                            })
                        >
                            {group.label}
                        </div>
                        <Show when=is_open>
                            {group.items.iter().map(|&(href, label, icon_name)| {
                                view! {
                                    <A href=href attr:class=move || {
                                        if location.pathname.get() == href {
                                            "app-sidebar__item app-sidebar__item--active"
                                        } else {
                                            "app-sidebar__item"
                                        }
                                    }>
                                        {icon(icon_name)}
                                        <span>{label}</span>
                                    </A>
                                }
                            }).collect_view()}
                        </Show>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}
