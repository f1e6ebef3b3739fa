use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Column, EnumFilterDef, FilterOptions, HasRecordId, RecordId, Resource};
use crate::shared::format::{format_date, format_money};
use crate::shared::list_view::{FieldValue, Filterable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPresupuesto {
    #[default]
    Pendiente,
    Aprobado,
    Rechazado,
    Vencido,
}

impl EstadoPresupuesto {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoPresupuesto::Pendiente => "pendiente",
            EstadoPresupuesto::Aprobado => "aprobado",
            EstadoPresupuesto::Rechazado => "rechazado",
            EstadoPresupuesto::Vencido => "vencido",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EstadoPresupuesto::Pendiente => "Pendiente",
            EstadoPresupuesto::Aprobado => "Aprobado",
            EstadoPresupuesto::Rechazado => "Rechazado",
            EstadoPresupuesto::Vencido => "Vencido",
        }
    }
}

/// Presupuesto de venta. Se edita en su propia pantalla; aquí solo se lista y elimina.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presupuesto {
    pub id: RecordId,
    pub numero: String,
    pub cliente: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub estado: EstadoPresupuesto,
}

const COLUMNS: &[Column] = &[
    Column::left("numero", "Número"),
    Column::center("fecha", "Fecha"),
    Column::left("cliente", "Cliente"),
    Column::right("total", "Total"),
    Column::left("estado", "Estado"),
];

const FILTERS: &[EnumFilterDef] = &[
    EnumFilterDef {
        name: "estado",
        label: "Estado",
        options: FilterOptions::Fixed(&[
            ("all", "Todos"),
            ("pendiente", "Pendiente"),
            ("aprobado", "Aprobado"),
            ("rechazado", "Rechazado"),
            ("vencido", "Vencido"),
        ]),
    },
    EnumFilterDef {
        name: "anio",
        label: "Año",
        options: FilterOptions::FromData,
    },
];

impl Filterable for Presupuesto {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.numero.as_str()), Some(self.cliente.as_str())]
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "estado" => Some(FieldValue::Text(self.estado.as_str().into())),
            "anio" => Some(FieldValue::Int(i64::from(self.fecha.year()))),
            _ => None,
        }
    }
}

impl HasRecordId for Presupuesto {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Presupuesto {
    const PATH: &'static str = "presupuestos";
    const COLLECTION_KEY: &'static str = "presupuestos";
    const TITLE: &'static str = "Presupuestos";
    const SINGULAR: &'static str = "presupuesto";

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.numero.clone(),
            format_date(self.fecha),
            self.cliente.clone(),
            format_money(self.total),
            self.estado.label().to_string(),
        ]
    }

    fn enum_filters() -> &'static [EnumFilterDef] {
        FILTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::{apply_filters, distinct_values, FilterState};
    use serde_json::json;

    fn presupuestos() -> Vec<Presupuesto> {
        serde_json::from_value(json!([
            {"id": 1, "numero": "P-0001", "cliente": "Ana", "fecha": "2023-11-02", "total": 100.0, "estado": "aprobado"},
            {"id": 2, "numero": "P-0002", "cliente": "Beto", "fecha": "2024-01-15", "total": 50.0},
            {"id": 3, "numero": "P-0003", "cliente": "Ana", "fecha": "2024-02-20", "total": 75.0, "estado": "aprobado"}
        ]))
        .unwrap()
    }

    #[test]
    fn year_filter_uses_fecha() {
        let data = presupuestos();
        assert_eq!(distinct_values(&data, "anio"), vec!["2023", "2024"]);

        let filter = FilterState::new(10)
            .with_enum("anio", "2024")
            .with_enum("estado", "aprobado");
        let result = apply_filters(&data, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].numero, "P-0003");
    }

    #[test]
    fn estado_defaults_to_pendiente() {
        assert_eq!(presupuestos()[1].estado, EstadoPresupuesto::Pendiente);
    }
}
