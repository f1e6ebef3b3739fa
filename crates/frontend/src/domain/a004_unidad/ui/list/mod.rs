use contracts::domain::a004_unidad::aggregate::Unidad;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn UnidadList() -> impl IntoView {
    resource_list_page::<Unidad>()
}
