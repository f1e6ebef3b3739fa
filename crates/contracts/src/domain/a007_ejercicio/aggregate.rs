use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Column, EnumFilterDef, FilterOptions, HasRecordId, RecordId, Resource};
use crate::shared::format::format_date;
use crate::shared::list_view::{FieldValue, Filterable};

/// Ejercicio contable: período con fecha de inicio y cierre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ejercicio {
    pub id: RecordId,
    pub descripcion: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[serde(default)]
    pub cerrado: bool,
}

impl Ejercicio {
    pub fn estado(&self) -> &'static str {
        if self.cerrado {
            "cerrado"
        } else {
            "abierto"
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.fecha_inicio <= date && date <= self.fecha_fin
    }
}

const COLUMNS: &[Column] = &[
    Column::left("descripcion", "Descripción"),
    Column::center("fecha_inicio", "Inicio"),
    Column::center("fecha_fin", "Cierre"),
    Column::left("estado", "Estado"),
];

const FILTERS: &[EnumFilterDef] = &[EnumFilterDef {
    name: "estado",
    label: "Estado",
    options: FilterOptions::Fixed(&[("all", "Todos"), ("abierto", "Abiertos"), ("cerrado", "Cerrados")]),
}];

impl Filterable for Ejercicio {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.descripcion.as_str())]
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "estado" => Some(FieldValue::Text(self.estado().into())),
            _ => None,
        }
    }
}

impl HasRecordId for Ejercicio {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Ejercicio {
    const PATH: &'static str = "contabilidad/ejercicios";
    const COLLECTION_KEY: &'static str = "ejercicios";
    const TITLE: &'static str = "Ejercicios contables";
    const SINGULAR: &'static str = "ejercicio";
    const CAN_DELETE: bool = false;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.descripcion.clone(),
            format_date(self.fecha_inicio),
            format_date(self.fecha_fin),
            if self.cerrado { "Cerrado" } else { "Abierto" }.to_string(),
        ]
    }

    fn enum_filters() -> &'static [EnumFilterDef] {
        FILTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn open_or_closed_by_flag() {
        let e: Ejercicio = serde_json::from_value(json!({
            "id": 1, "descripcion": "Ejercicio 2024",
            "fecha_inicio": "2024-01-01", "fecha_fin": "2024-12-31"
        }))
        .unwrap();
        assert_eq!(e.estado(), "abierto");
        assert!(e.contains(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
        assert!(!e.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }
}
