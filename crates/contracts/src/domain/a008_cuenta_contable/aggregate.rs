use serde::{Deserialize, Serialize};

use crate::domain::common::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoCuenta {
    Activo,
    Pasivo,
    PatrimonioNeto,
    Ingreso,
    Egreso,
    #[default]
    #[serde(other)]
    Otro,
}

impl TipoCuenta {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoCuenta::Activo => "activo",
            TipoCuenta::Pasivo => "pasivo",
            TipoCuenta::PatrimonioNeto => "patrimonio_neto",
            TipoCuenta::Ingreso => "ingreso",
            TipoCuenta::Egreso => "egreso",
            TipoCuenta::Otro => "otro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipoCuenta::Activo => "Activo",
            TipoCuenta::Pasivo => "Pasivo",
            TipoCuenta::PatrimonioNeto => "Patrimonio neto",
            TipoCuenta::Ingreso => "Ingreso",
            TipoCuenta::Egreso => "Egreso",
            TipoCuenta::Otro => "Otro",
        }
    }
}

/// Nodo del plan de cuentas tal como lo envía el backend (árbol anidado)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuentaContable {
    pub id: RecordId,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub tipo: TipoCuenta,
    /// Cuenta hoja, utilizable en asientos
    #[serde(default)]
    pub imputable: bool,
    pub nivel: u32,
    #[serde(default)]
    pub padre_id: Option<RecordId>,
    #[serde(default, alias = "hijos")]
    pub children: Vec<CuentaContable>,
}
