use contracts::domain::a007_ejercicio::aggregate::Ejercicio;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn EjercicioList() -> impl IntoView {
    resource_list_page::<Ejercicio>()
}
