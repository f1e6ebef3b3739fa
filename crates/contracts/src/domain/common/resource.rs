use serde::de::DeserializeOwned;
use serde::Serialize;

use super::record_id::{HasRecordId, RecordId};
use crate::shared::list_view::Filterable;

/// How a resource's save endpoint expects its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
}

/// Save endpoint convention of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveEndpoint {
    /// `POST /api/<resource>/guardar/` for both create and update (id travels in the body).
    Guardar,
    /// `POST /api/<resource>/crear/` and `POST /api/<resource>/<id>/editar/`.
    CreateEdit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn left(key: &'static str, title: &'static str) -> Self {
        Self { key, title, align: Align::Left }
    }

    pub const fn right(key: &'static str, title: &'static str) -> Self {
        Self { key, title, align: Align::Right }
    }

    pub const fn center(key: &'static str, title: &'static str) -> Self {
        Self { key, title, align: Align::Center }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    /// Whole number.
    Integer,
    /// Amount with decimals.
    Decimal,
    /// `YYYY-MM-DD`.
    Date,
    Bool,
    /// Fixed set of `(value, label)` pairs.
    Choice(&'static [(&'static str, &'static str)]),
}

/// One input of a record's modal form. `name` matches the record's serde field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOptions {
    Fixed(&'static [(&'static str, &'static str)]),
    /// Options are the distinct values present in the loaded dataset.
    FromData,
}

/// A select-style filter bound to a named field of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumFilterDef {
    pub name: &'static str,
    pub label: &'static str,
    pub options: FilterOptions,
}

/// A backend-managed entity type with a list page.
pub trait Resource:
    Filterable + HasRecordId + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Path segment under `/api/`, e.g. `clientes` or `contabilidad/ejercicios`.
    const PATH: &'static str;
    /// Key holding the array in list responses when `data` is absent.
    const COLLECTION_KEY: &'static str;
    const TITLE: &'static str;
    const SINGULAR: &'static str;
    const BODY: BodyEncoding = BodyEncoding::Json;
    const SAVE: SaveEndpoint = SaveEndpoint::Guardar;
    const CAN_DELETE: bool = true;

    fn columns() -> &'static [Column];

    /// Display text per column, same order as `columns()`.
    fn cells(&self) -> Vec<String>;

    /// Modal form schema. Empty means the page is read-only.
    fn form_fields() -> &'static [FormField] {
        &[]
    }

    fn enum_filters() -> &'static [EnumFilterDef] {
        &[]
    }
}

pub fn list_path<R: Resource>() -> String {
    format!("/api/{}/", R::PATH)
}

pub fn detail_path<R: Resource>(id: RecordId) -> String {
    format!("/api/{}/{}/", R::PATH, id)
}

pub fn save_path<R: Resource>(id: Option<RecordId>) -> String {
    match (R::SAVE, id) {
        (SaveEndpoint::Guardar, _) => format!("/api/{}/guardar/", R::PATH),
        (SaveEndpoint::CreateEdit, None) => format!("/api/{}/crear/", R::PATH),
        (SaveEndpoint::CreateEdit, Some(id)) => format!("/api/{}/{}/editar/", R::PATH, id),
    }
}

pub fn delete_path<R: Resource>(id: RecordId) -> String {
    format!("/api/{}/{}/eliminar/", R::PATH, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_cliente::aggregate::Cliente;
    use crate::domain::a003_rubro::aggregate::Rubro;

    #[test]
    fn guardar_resources_share_one_save_path() {
        assert_eq!(save_path::<Cliente>(None), "/api/clientes/guardar/");
        assert_eq!(save_path::<Cliente>(Some(RecordId(3))), "/api/clientes/guardar/");
    }

    #[test]
    fn create_edit_resources_split_paths() {
        assert_eq!(save_path::<Rubro>(None), "/api/rubros/crear/");
        assert_eq!(save_path::<Rubro>(Some(RecordId(9))), "/api/rubros/9/editar/");
    }

    #[test]
    fn detail_and_delete_paths() {
        assert_eq!(list_path::<Cliente>(), "/api/clientes/");
        assert_eq!(detail_path::<Cliente>(RecordId(7)), "/api/clientes/7/");
        assert_eq!(delete_path::<Cliente>(RecordId(7)), "/api/clientes/7/eliminar/");
    }
}
