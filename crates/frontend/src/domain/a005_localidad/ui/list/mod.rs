use contracts::domain::a005_localidad::aggregate::Localidad;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn LocalidadList() -> impl IntoView {
    resource_list_page::<Localidad>()
}
