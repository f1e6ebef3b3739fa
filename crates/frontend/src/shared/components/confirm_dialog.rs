use leptos::prelude::*;
use thaw::*;

use crate::shared::modal::Modal;

/// Yes/no confirmation shown while a delete is armed
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    message: Signal<String>,
    /// Disables both buttons while the request runs
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal
            title="Confirmar eliminación".to_string()
            on_close=on_dismiss
            footer=move || view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_dismiss.run(())
                    disabled=busy
                >
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_confirm.run(())
                    disabled=busy
                >
                    {move || if busy.get() { "Eliminando..." } else { "Eliminar" }}
                </Button>
            }
        >
            <p class="confirm-dialog__message">{move || message.get()}</p>
        </Modal>
    }
}
