use serde::{Deserialize, Serialize};

use crate::domain::common::{
    BodyEncoding, Column, EnumFilterDef, FieldKind, FilterOptions, FormField, HasRecordId,
    RecordId, Resource,
};
use crate::shared::format::yes_no;
use crate::shared::list_view::{FieldValue, Filterable};

fn default_true() -> bool {
    true
}

/// Cliente de ventas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: RecordId,
    pub nombre: String,
    #[serde(default)]
    pub cuit: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub localidad: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

const COLUMNS: &[Column] = &[
    Column::left("nombre", "Nombre"),
    Column::left("cuit", "CUIT"),
    Column::left("email", "Email"),
    Column::left("telefono", "Teléfono"),
    Column::left("localidad", "Localidad"),
    Column::center("activo", "Activo"),
];

const FORM: &[FormField] = &[
    FormField::required("nombre", "Nombre", FieldKind::Text),
    FormField::optional("cuit", "CUIT", FieldKind::Text),
    FormField::optional("email", "Email", FieldKind::Email),
    FormField::optional("telefono", "Teléfono", FieldKind::Text),
    FormField::optional("direccion", "Dirección", FieldKind::Text),
    FormField::optional("localidad", "Localidad", FieldKind::Text),
    FormField::optional("activo", "Activo", FieldKind::Bool),
];

const FILTERS: &[EnumFilterDef] = &[EnumFilterDef {
    name: "activo",
    label: "Estado",
    options: FilterOptions::Fixed(&[("all", "Todos"), ("true", "Activos"), ("false", "Inactivos")]),
}];

impl Filterable for Cliente {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.nombre.as_str()),
            self.cuit.as_deref(),
            self.email.as_deref(),
            self.telefono.as_deref(),
            self.localidad.as_deref(),
        ]
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "activo" => Some(FieldValue::Bool(self.activo)),
            "localidad" => self.localidad.as_deref().map(|l| FieldValue::Text(l.into())),
            _ => None,
        }
    }
}

impl HasRecordId for Cliente {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Cliente {
    const PATH: &'static str = "clientes";
    const COLLECTION_KEY: &'static str = "clientes";
    const TITLE: &'static str = "Clientes";
    const SINGULAR: &'static str = "cliente";
    const BODY: BodyEncoding = BodyEncoding::Form;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.cuit.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.telefono.clone().unwrap_or_default(),
            self.localidad.clone().unwrap_or_default(),
            yes_no(self.activo),
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
    use crate::shared::form::{json_body, values_from_detail};
    use serde_json::json;

    #[test]
    fn missing_optional_fields_default() {
        let c: Cliente = serde_json::from_value(json!({"id": 1, "nombre": "Ana"})).unwrap();
        assert!(c.activo);
        assert_eq!(c.email, None);
        assert_eq!(c.cells().len(), Cliente::columns().len());
    }

    #[test]
    fn form_round_trips_into_a_record() {
        let detail = json!({"id": 4, "nombre": "Ferretería Norte", "cuit": "30-1", "activo": false});
        let values = values_from_detail(Cliente::form_fields(), &detail);
        let body = json_body(Cliente::form_fields(), &values, Some(RecordId(4)));
        let rebuilt: Cliente = serde_json::from_value(body).unwrap();
        assert_eq!(rebuilt.id, RecordId(4));
        assert_eq!(rebuilt.nombre, "Ferretería Norte");
        assert_eq!(rebuilt.cuit.as_deref(), Some("30-1"));
        assert!(!rebuilt.activo);
    }
}
