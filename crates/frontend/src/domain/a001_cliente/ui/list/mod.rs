use contracts::domain::a001_cliente::aggregate::Cliente;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn ClienteList() -> impl IntoView {
    resource_list_page::<Cliente>()
}
