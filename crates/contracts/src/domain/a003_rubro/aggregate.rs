use serde::{Deserialize, Serialize};

use crate::domain::common::{Column, FieldKind, FormField, HasRecordId, RecordId, Resource, SaveEndpoint};
use crate::shared::list_view::{FieldValue, Filterable};

/// Rubro (agrupación de artículos de inventario)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubro {
    pub id: RecordId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column::left("nombre", "Nombre"),
    Column::left("descripcion", "Descripción"),
];

const FORM: &[FormField] = &[
    FormField::required("nombre", "Nombre", FieldKind::Text),
    FormField::optional("descripcion", "Descripción", FieldKind::Text),
];

impl Filterable for Rubro {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.nombre.as_str()), self.descripcion.as_deref()]
    }

    fn field_value(&self, _name: &str) -> Option<FieldValue<'_>> {
        None
    }
}

impl HasRecordId for Rubro {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Rubro {
    const PATH: &'static str = "rubros";
    const COLLECTION_KEY: &'static str = "rubros";
    const TITLE: &'static str = "Rubros";
    const SINGULAR: &'static str = "rubro";
    const SAVE: SaveEndpoint = SaveEndpoint::CreateEdit;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.nombre.clone(), self.descripcion.clone().unwrap_or_default()]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }
}
