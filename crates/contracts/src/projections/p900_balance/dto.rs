use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::common::RecordId;
use crate::shared::api_response::Envelope;
use crate::shared::error::ApiError;

pub const BALANCE_PATH: &str = "/api/contabilidad/balance/";
pub const EXPORT_PATH: &str = "/api/contabilidad/balance/exportar/";

/// Parámetros del balance de sumas y saldos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceQuery {
    pub ejercicio_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_desde: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_hasta: Option<NaiveDate>,
    /// Deepest level shown; `None` shows all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel: Option<u32>,
    pub solo_con_movimientos: bool,
    pub incluir_subtotales: bool,
}

impl BalanceQuery {
    pub fn new(ejercicio_id: RecordId) -> Self {
        Self {
            ejercicio_id,
            fecha_desde: None,
            fecha_hasta: None,
            nivel: None,
            solo_con_movimientos: false,
            incluir_subtotales: true,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let (Some(desde), Some(hasta)) = (self.fecha_desde, self.fecha_hasta) {
            if desde > hasta {
                return Err("La fecha desde no puede ser posterior a la fecha hasta".into());
            }
        }
        if self.nivel == Some(0) {
            return Err("El nivel debe ser mayor a cero".into());
        }
        Ok(())
    }

    pub fn to_query_string(&self) -> Result<String, ApiError> {
        serde_qs::to_string(self).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Path with query for the JSON report.
    pub fn report_path(&self) -> Result<String, ApiError> {
        Ok(format!("{}?{}", BALANCE_PATH, self.to_query_string()?))
    }

    /// Path with query for the spreadsheet download, opened in a new window.
    pub fn export_path(&self) -> Result<String, ApiError> {
        Ok(format!("{}?{}&formato=excel", EXPORT_PATH, self.to_query_string()?))
    }
}

/// Fila del balance: una cuenta (o subtotal de rubro) con sus sumas y saldo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    #[serde(default)]
    pub cuenta_id: Option<RecordId>,
    pub codigo: String,
    pub nombre: String,
    #[serde(default = "default_nivel")]
    pub nivel: u32,
    #[serde(default)]
    pub imputable: bool,
    #[serde(default)]
    pub es_subtotal: bool,
    #[serde(default)]
    pub saldo_anterior: f64,
    #[serde(default)]
    pub debe: f64,
    #[serde(default)]
    pub haber: f64,
    #[serde(default)]
    pub saldo: f64,
}

fn default_nivel() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceTotales {
    #[serde(default)]
    pub debe: f64,
    #[serde(default)]
    pub haber: f64,
    #[serde(default)]
    pub saldo: f64,
}

impl BalanceTotales {
    /// Debe and haber agree to the cent.
    pub fn is_balanced(&self) -> bool {
        (self.debe - self.haber).abs() < 0.005
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceReport {
    pub cuentas: Vec<BalanceRow>,
    pub totales: BalanceTotales,
}

impl BalanceReport {
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        Self::parse_response(body, true)
    }

    pub fn parse_response(body: &str, http_ok: bool) -> Result<Self, ApiError> {
        let value = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
        Self::from_response(value, http_ok)
    }

    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        Self::from_response(value, true)
    }

    /// Reads `{success, cuentas, totales}` or the same pair nested under `data`.
    /// Missing totals are summed from imputable rows.
    pub fn from_response(value: Value, http_ok: bool) -> Result<Self, ApiError> {
        let totales = value
            .get("totales")
            .or_else(|| value.get("data").and_then(|d| d.get("totales")))
            .cloned();
        let envelope = Envelope::from_response(value, Some("cuentas"), http_ok).into_result()?;
        let cuentas_value = match envelope.data {
            Value::Object(mut obj) => obj.remove("cuentas").unwrap_or(Value::Null),
            other => other,
        };
        let cuentas: Vec<BalanceRow> = match cuentas_value {
            Value::Null => Vec::new(),
            value => serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?,
        };
        let totales = match totales {
            Some(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?
            }
            None => sum_totals(&cuentas),
        };
        Ok(Self { cuentas, totales })
    }
}

fn sum_totals(rows: &[BalanceRow]) -> BalanceTotales {
    rows.iter()
        .filter(|r| r.imputable && !r.es_subtotal)
        .fold(BalanceTotales::default(), |mut acc, r| {
            acc.debe += r.debe;
            acc.haber += r.haber;
            acc.saldo += r.saldo;
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_string_skips_unset_dates() {
        let mut q = BalanceQuery::new(RecordId(3));
        q.nivel = Some(2);
        let qs = q.to_query_string().unwrap();
        assert!(qs.contains("ejercicio_id=3"));
        assert!(qs.contains("nivel=2"));
        assert!(qs.contains("solo_con_movimientos=false"));
        assert!(qs.contains("incluir_subtotales=true"));
        assert!(!qs.contains("fecha_desde"));
    }

    #[test]
    fn export_path_asks_for_excel() {
        let mut q = BalanceQuery::new(RecordId(3));
        q.fecha_desde = NaiveDate::from_ymd_opt(2024, 1, 1);
        let path = q.export_path().unwrap();
        assert!(path.starts_with("/api/contabilidad/balance/exportar/?"));
        assert!(path.contains("fecha_desde=2024-01-01"));
        assert!(path.ends_with("&formato=excel"));
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let mut q = BalanceQuery::new(RecordId(1));
        q.fecha_desde = NaiveDate::from_ymd_opt(2024, 6, 1);
        q.fecha_hasta = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(q.validate().is_err());
    }

    #[test]
    fn report_reads_success_payload() {
        let report = BalanceReport::from_value(json!({
            "success": true,
            "cuentas": [
                {"codigo": "1", "nombre": "Activo", "nivel": 1, "es_subtotal": true, "debe": 150.0, "haber": 50.0, "saldo": 100.0},
                {"codigo": "1.1.01", "nombre": "Caja", "nivel": 3, "imputable": true, "debe": 150.0, "haber": 50.0, "saldo": 100.0}
            ],
            "totales": {"debe": 150.0, "haber": 150.0, "saldo": 0.0}
        }))
        .unwrap();
        assert_eq!(report.cuentas.len(), 2);
        assert_eq!(report.totales.haber, 150.0);
        assert!(report.totales.is_balanced());
    }

    #[test]
    fn missing_totals_are_summed_from_imputable_rows() {
        let report = BalanceReport::parse(
            r#"{"ok": true, "cuentas": [
                {"codigo": "1", "nombre": "Activo", "es_subtotal": true, "debe": 150.0, "haber": 50.0},
                {"codigo": "1.1.01", "nombre": "Caja", "imputable": true, "debe": 150.0, "haber": 50.0, "saldo": 100.0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(report.totales.debe, 150.0);
        assert_eq!(report.totales.haber, 50.0);
        assert!(!report.totales.is_balanced());
    }

    #[test]
    fn report_nested_under_data() {
        let report = BalanceReport::from_value(json!({
            "success": true,
            "data": {
                "cuentas": [{"codigo": "1.1.01", "nombre": "Caja", "imputable": true, "debe": 10.0, "haber": 10.0}],
                "totales": {"debe": 10.0, "haber": 10.0, "saldo": 0.0}
            }
        }))
        .unwrap();
        assert!(report.totales.is_balanced());
        assert_eq!(report.cuentas[0].nivel, 1);
    }

    #[test]
    fn server_error_page_is_not_an_empty_report() {
        let report = BalanceReport::parse_response(r#"{"cuentas": []}"#, false);
        assert_eq!(report, Err(ApiError::Rejected(crate::shared::error::GENERIC_ERROR.into())));
    }

    #[test]
    fn failure_is_reported() {
        assert_eq!(
            BalanceReport::from_value(json!({"success": false, "error": "Ejercicio inexistente"})),
            Err(ApiError::Rejected("Ejercicio inexistente".into()))
        );
    }
}
