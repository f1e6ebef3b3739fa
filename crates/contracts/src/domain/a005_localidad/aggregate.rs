use serde::{Deserialize, Serialize};

use crate::domain::common::{
    Column, EnumFilterDef, FieldKind, FilterOptions, FormField, HasRecordId, RecordId, Resource,
    SaveEndpoint,
};
use crate::shared::list_view::{FieldValue, Filterable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localidad {
    pub id: RecordId,
    pub nombre: String,
    #[serde(default)]
    pub codigo_postal: Option<String>,
    #[serde(default)]
    pub provincia: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column::left("nombre", "Nombre"),
    Column::left("codigo_postal", "Código postal"),
    Column::left("provincia", "Provincia"),
];

const FORM: &[FormField] = &[
    FormField::required("nombre", "Nombre", FieldKind::Text),
    FormField::optional("codigo_postal", "Código postal", FieldKind::Text),
    FormField::optional("provincia", "Provincia", FieldKind::Text),
];

const FILTERS: &[EnumFilterDef] = &[EnumFilterDef {
    name: "provincia",
    label: "Provincia",
    options: FilterOptions::FromData,
}];

impl Filterable for Localidad {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.nombre.as_str()),
            self.codigo_postal.as_deref(),
            self.provincia.as_deref(),
        ]
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "provincia" => self.provincia.as_deref().map(|p| FieldValue::Text(p.into())),
            _ => None,
        }
    }
}

impl HasRecordId for Localidad {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Resource for Localidad {
    const PATH: &'static str = "localidades";
    const COLLECTION_KEY: &'static str = "localidades";
    const TITLE: &'static str = "Localidades";
    const SINGULAR: &'static str = "localidad";
    const SAVE: SaveEndpoint = SaveEndpoint::CreateEdit;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.nombre.clone(),
            self.codigo_postal.clone().unwrap_or_default(),
            self.provincia.clone().unwrap_or_default(),
        ]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn enum_filters() -> &'static [EnumFilterDef] {
        FILTERS
    }
}
