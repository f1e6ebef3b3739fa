use serde::{Deserialize, Serialize};

use crate::domain::common::{Column, FieldKind, FormField, HasRecordId, RecordId, Resource, SaveEndpoint};
use crate::shared::list_view::{FieldValue, Filterable};

/// Unidad de medida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unidad {
    pub id: RecordId,
    pub nombre: String,
    #[serde(default)]
    pub abreviatura: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column::left("nombre", "Nombre"),
    Column::left("abreviatura", "Abreviatura"),
];

const FORM: &[FormField] = &[
    FormField::required("nombre", "Nombre", FieldKind::Text),
    FormField::optional("abreviatura", "Abreviatura", FieldKind::Text),
];

impl Filterable for Unidad {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.nombre.as_str()), self.abreviatura.as_deref()]
    }

    fn field_value(&self, _name: &str) -> Option<FieldValue<'_>> {
        None
    }
}

impl HasRecordId for Unidad {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Unidad {
    const PATH: &'static str = "unidades";
    const COLLECTION_KEY: &'static str = "unidades";
    const TITLE: &'static str = "Unidades de medida";
    const SINGULAR: &'static str = "unidad";
    const SAVE: SaveEndpoint = SaveEndpoint::CreateEdit;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.nombre.clone(), self.abreviatura.clone().unwrap_or_default()]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }
}
