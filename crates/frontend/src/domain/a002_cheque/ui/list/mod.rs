use contracts::domain::a002_cheque::aggregate::Cheque;
use leptos::prelude::*;

use crate::shared::resource_page::resource_list_page;

#[component]
#[allow(non_snake_case)]
pub fn ChequeList() -> impl IntoView {
    resource_list_page::<Cheque>()
}
