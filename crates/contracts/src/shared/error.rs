use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Message shown when the backend answers with something that is not a usable JSON object.
pub const GENERIC_ERROR: &str = "Respuesta inválida del servidor";

/// Everything that can go wrong between a page and the REST backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (fetch rejected).
    #[error("Error de conexión: {0}")]
    Network(String),
    /// The backend rejected one or more fields.
    #[error("{}", summarize(.0))]
    Validation(FieldErrors),
    /// The backend reported a failure without a field mapping.
    #[error("{0}")]
    Rejected(String),
    /// The payload was an object, but not the record shape we expected.
    #[error("No se pudo interpretar la respuesta: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_every_message() {
        let mut errors = FieldErrors::new();
        errors.insert("nombre".into(), vec!["El nombre es obligatorio.".into()]);
        errors.insert("cuit".into(), vec!["CUIT inválido.".into(), "Ya existe.".into()]);

        let text = ApiError::Validation(errors).to_string();
        assert_eq!(
            text,
            "cuit: CUIT inválido.; cuit: Ya existe.; nombre: El nombre es obligatorio."
        );
    }

    #[test]
    fn only_validation_carries_field_errors() {
        assert!(ApiError::Rejected("x".into()).field_errors().is_none());
        assert!(ApiError::Validation(FieldErrors::new()).field_errors().is_some());
    }
}
