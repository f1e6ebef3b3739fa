use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use thaw::ConfigProvider;

use crate::domain::a001_cliente::ui::list::ClienteList;
use crate::domain::a002_cheque::ui::list::ChequeList;
use crate::domain::a003_rubro::ui::list::RubroList;
use crate::domain::a004_unidad::ui::list::UnidadList;
use crate::domain::a005_localidad::ui::list::LocalidadList;
use crate::domain::a006_presupuesto::ui::list::PresupuestoList;
use crate::domain::a007_ejercicio::ui::list::EjercicioList;
use crate::domain::a008_cuenta_contable::ui::plan::PlanCuentas;
use crate::layout::sidebar::Sidebar;
use crate::layout::Shell;
use crate::projections::p900_balance::ui::report::BalanceReportPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <Router>
                <Shell
                    left=|| view! { <Sidebar /> }.into_any()
                    center=|| view! {
                        <Routes fallback=|| view! { <div class="page">"Página no encontrada"</div> }>
                            <Route path=path!("/") view=ClienteList />
                            <Route path=path!("/clientes") view=ClienteList />
                            <Route path=path!("/cheques") view=ChequeList />
                            <Route path=path!("/rubros") view=RubroList />
                            <Route path=path!("/unidades") view=UnidadList />
                            <Route path=path!("/localidades") view=LocalidadList />
                            <Route path=path!("/presupuestos") view=PresupuestoList />
                            <Route path=path!("/contabilidad/ejercicios") view=EjercicioList />
                            <Route path=path!("/contabilidad/plan-cuentas") view=PlanCuentas />
                            <Route path=path!("/contabilidad/balance") view=BalanceReportPage />
                        </Routes>
                    }.into_any()
                />
            </Router>
        </ConfigProvider>
    }
}
