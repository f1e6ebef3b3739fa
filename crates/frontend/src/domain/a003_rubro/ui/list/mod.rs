use contracts::domain::a003_rubro::aggregate::Rubro;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn RubroList() -> impl IntoView {
    resource_list_page::<Rubro>()
}
