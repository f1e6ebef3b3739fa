use contracts::domain::a006_presupuesto::aggregate::Presupuesto;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn PresupuestoList() -> impl IntoView {
    resource_list_page::<Presupuesto>()
}
