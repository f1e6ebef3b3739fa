//! One normalized shape for every backend answer.
//!
//! Endpoints disagree on spelling (`ok` vs `success`, `data` vs `<resource>`,
//! `error` vs `detail`) and on whether field errors are strings or lists.
//! [`Envelope`] absorbs all of that so pages only see `{ok, data, errors}`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::common::RecordId;
use crate::shared::error::{ApiError, FieldErrors, GENERIC_ERROR};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    pub ok: bool,
    pub data: Value,
    pub total: Option<u64>,
    pub error: Option<String>,
    pub errors: FieldErrors,
    pub id: Option<RecordId>,
}

impl Envelope {
    /// Parses a raw response body. Anything that is not JSON counts as an empty object.
    pub fn parse(body: &str, collection_key: Option<&str>) -> Self {
        Self::parse_response(body, collection_key, true)
    }

    /// Like [`Envelope::parse`], for a body that came with an HTTP status.
    /// A non-2xx status without an explicit `ok`/`success` flag is a failure.
    pub fn parse_response(body: &str, collection_key: Option<&str>, http_ok: bool) -> Self {
        let value = serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::Object(Map::new()));
        Self::from_response(value, collection_key, http_ok)
    }

    pub fn from_value(value: Value, collection_key: Option<&str>) -> Self {
        Self::from_response(value, collection_key, true)
    }

    pub fn from_response(value: Value, collection_key: Option<&str>, http_ok: bool) -> Self {
        let obj = match value {
            Value::Array(items) => {
                return Self {
                    ok: http_ok,
                    total: Some(items.len() as u64),
                    data: Value::Array(items),
                    ..Self::default()
                }
            }
            Value::Object(obj) => obj,
            _ => Map::new(),
        };

        let errors = obj.get("errors").map(field_errors).unwrap_or_default();
        let error = ["error", "detail", "message"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(message_text));
        let explicit_ok = obj
            .get("ok")
            .or_else(|| obj.get("success"))
            .and_then(Value::as_bool);
        let ok = match explicit_ok {
            Some(ok) => ok && errors.is_empty(),
            // Bare detail objects carry no flag at all.
            None => http_ok && errors.is_empty() && error.is_none() && !obj.is_empty(),
        };

        let total = obj.get("total").and_then(Value::as_u64);
        let id = obj
            .get("id")
            .and_then(Value::as_i64)
            .or_else(|| obj.get("data").and_then(|d| d.get("id")).and_then(Value::as_i64))
            .map(RecordId);

        let data = obj
            .get("data")
            .or_else(|| collection_key.and_then(|key| obj.get(key)))
            .cloned()
            .unwrap_or_else(|| {
                if explicit_ok.is_none() {
                    Value::Object(obj.clone())
                } else {
                    Value::Null
                }
            });

        Self { ok, data, total, error, errors, id }
    }

    /// Splits failures out: field errors first, then any other rejection.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if !self.errors.is_empty() {
            return Err(ApiError::Validation(self.errors));
        }
        if !self.ok {
            return Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| GENERIC_ERROR.to_string()),
            ));
        }
        Ok(self)
    }

    pub fn records<T: DeserializeOwned>(self) -> Result<Vec<T>, ApiError> {
        match self.into_result()?.data {
            Value::Null => Ok(Vec::new()),
            data => serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string())),
        }
    }

    pub fn record<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let data = self.into_result()?.data;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(message_text),
        _ => None,
    }
}

fn field_errors(value: &Value) -> FieldErrors {
    let Some(obj) = value.as_object() else {
        return FieldErrors::new();
    };
    obj.iter()
        .filter_map(|(field, messages)| {
            let list: Vec<String> = match messages {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|m| match m {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                Value::Null => Vec::new(),
                other => vec![other.to_string()],
            };
            (!list.is_empty()).then(|| (field.clone(), list))
        })
        .collect()
}
