//! Common types and traits for all resources

pub mod record_id;
pub mod resource;

// Re-exports
pub use record_id::{HasRecordId, RecordId};
pub use resource::{
    Align, BodyEncoding, Column, EnumFilterDef, FieldKind, FilterOptions, FormField, Resource,
    SaveEndpoint,
};
