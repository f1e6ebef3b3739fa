use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    Column, EnumFilterDef, FieldKind, FilterOptions, FormField, HasRecordId, RecordId, Resource,
};
use crate::shared::format::{format_date_opt, format_money};
use crate::shared::list_view::{FieldValue, Filterable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCheque {
    #[default]
    EnCartera,
    Depositado,
    Endosado,
    Rechazado,
    Cobrado,
}

impl EstadoCheque {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoCheque::EnCartera => "en_cartera",
            EstadoCheque::Depositado => "depositado",
            EstadoCheque::Endosado => "endosado",
            EstadoCheque::Rechazado => "rechazado",
            EstadoCheque::Cobrado => "cobrado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EstadoCheque::EnCartera => "En cartera",
            EstadoCheque::Depositado => "Depositado",
            EstadoCheque::Endosado => "Endosado",
            EstadoCheque::Rechazado => "Rechazado",
            EstadoCheque::Cobrado => "Cobrado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoCheque {
    Propio,
    #[default]
    Tercero,
}

impl TipoCheque {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoCheque::Propio => "propio",
            TipoCheque::Tercero => "tercero",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipoCheque::Propio => "Propio",
            TipoCheque::Tercero => "De terceros",
        }
    }
}

/// Cheque de tesorería (propio o de terceros)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cheque {
    pub id: RecordId,
    pub numero: String,
    pub banco: String,
    #[serde(default)]
    pub librador: Option<String>,
    #[serde(default)]
    pub importe: f64,
    #[serde(default)]
    pub fecha_emision: Option<NaiveDate>,
    #[serde(default)]
    pub fecha_pago: Option<NaiveDate>,
    #[serde(default)]
    pub estado: EstadoCheque,
    #[serde(default)]
    pub tipo: TipoCheque,
}

const ESTADOS: &[(&str, &str)] = &[
    ("en_cartera", "En cartera"),
    ("depositado", "Depositado"),
    ("endosado", "Endosado"),
    ("rechazado", "Rechazado"),
    ("cobrado", "Cobrado"),
];

const TIPOS: &[(&str, &str)] = &[("tercero", "De terceros"), ("propio", "Propio")];

const COLUMNS: &[Column] = &[
    Column::left("numero", "Número"),
    Column::left("banco", "Banco"),
    Column::left("librador", "Librador"),
    Column::right("importe", "Importe"),
    Column::center("fecha_pago", "Fecha de pago"),
    Column::left("tipo", "Tipo"),
    Column::left("estado", "Estado"),
];

const FORM: &[FormField] = &[
    FormField::required("numero", "Número", FieldKind::Text),
    FormField::required("banco", "Banco", FieldKind::Text),
    FormField::optional("librador", "Librador", FieldKind::Text),
    FormField::required("importe", "Importe", FieldKind::Decimal),
    FormField::optional("fecha_emision", "Fecha de emisión", FieldKind::Date),
    FormField::required("fecha_pago", "Fecha de pago", FieldKind::Date),
    FormField::required("tipo", "Tipo", FieldKind::Choice(TIPOS)),
    FormField::required("estado", "Estado", FieldKind::Choice(ESTADOS)),
];

const ESTADO_FILTER: &[(&str, &str)] = &[
    ("all", "Todos"),
    ("en_cartera", "En cartera"),
    ("depositado", "Depositado"),
    ("endosado", "Endosado"),
    ("rechazado", "Rechazado"),
    ("cobrado", "Cobrado"),
];

const FILTERS: &[EnumFilterDef] = &[
    EnumFilterDef {
        name: "estado",
        label: "Estado",
        options: FilterOptions::Fixed(ESTADO_FILTER),
    },
    EnumFilterDef {
        name: "tipo",
        label: "Tipo",
        options: FilterOptions::Fixed(&[("all", "Todos"), ("tercero", "De terceros"), ("propio", "Propio")]),
    },
];

impl Filterable for Cheque {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.numero.as_str()),
            Some(self.banco.as_str()),
            self.librador.as_deref(),
        ]
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "estado" => Some(FieldValue::Text(self.estado.as_str().into())),
            "tipo" => Some(FieldValue::Text(self.tipo.as_str().into())),
            _ => None,
        }
    }
}

impl HasRecordId for Cheque {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Cheque {
    const PATH: &'static str = "cheques";
    const COLLECTION_KEY: &'static str = "cheques";
    const TITLE: &'static str = "Cheques";
    const SINGULAR: &'static str = "cheque";

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.numero.clone(),
            self.banco.clone(),
            self.librador.clone().unwrap_or_default(),
            format_money(self.importe),
            format_date_opt(self.fecha_pago),
            self.tipo.label().to_string(),
            self.estado.label().to_string(),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn enum_filters() -> &'static [EnumFilterDef] {
        FILTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::{apply_filters, FilterState};
    use serde_json::json;

    fn cheques() -> Vec<Cheque> {
        serde_json::from_value(json!([
            {"id": 1, "numero": "0001", "banco": "Nación", "importe": 1000.0, "estado": "en_cartera", "tipo": "tercero"},
            {"id": 2, "numero": "0002", "banco": "Galicia", "importe": 250.5, "estado": "depositado", "tipo": "tercero"},
            {"id": 3, "numero": "0003", "banco": "Nación", "importe": 99.0, "estado": "en_cartera", "tipo": "propio", "fecha_pago": "2024-05-10"}
        ]))
        .unwrap()
    }

    #[test]
    fn filters_by_estado_and_tipo() {
        let data = cheques();
        let filter = FilterState::new(10)
            .with_enum("estado", "en_cartera")
            .with_enum("tipo", "propio");
        let result = apply_filters(&data, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, RecordId(3));
    }

    #[test]
    fn cells_format_money_and_dates() {
        let data = cheques();
        let cells = data[2].cells();
        assert_eq!(cells[3], "99,00");
        assert_eq!(cells[4], "10/05/2024");
        assert_eq!(cells[6], "En cartera");
    }

    #[test]
    fn choice_options_match_serde_names() {
        for (value, _) in ESTADOS {
            let parsed: EstadoCheque = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
        for (value, _) in TIPOS {
            let parsed: TipoCheque = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
    }
}
