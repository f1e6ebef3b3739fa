//! Modal record form and two-step delete, as plain state machines.
//!
//! The controllers never talk to the network. Methods that need a request
//! return it (`open_edit`, `submit`, `DeleteFlow::confirm`); the page performs
//! it and feeds the outcome back (`detail_loaded`, `save_failed`, ...).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::domain::common::{FieldKind, FormField, RecordId};
use crate::shared::error::{ApiError, FieldErrors};

/// Raw input text per field name.
pub type FormValues = BTreeMap<String, String>;

pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio.";
pub const NUMBER_MESSAGE: &str = "Ingrese un número válido.";
pub const DATE_MESSAGE: &str = "Ingrese una fecha válida (AAAA-MM-DD).";
pub const EMAIL_MESSAGE: &str = "Ingrese un correo electrónico válido.";
pub const CHOICE_MESSAGE: &str = "Seleccione una opción válida.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    OpenNew,
    OpenNewWithErrors,
    FetchingDetail(RecordId),
    Populated(RecordId),
    PopulatedWithErrors(RecordId),
    /// `None` while creating.
    Submitting(Option<RecordId>),
}

impl ModalPhase {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalPhase::Closed)
    }

    /// Identity being edited, if any.
    pub fn editing(&self) -> Option<RecordId> {
        match *self {
            ModalPhase::FetchingDetail(id)
            | ModalPhase::Populated(id)
            | ModalPhase::PopulatedWithErrors(id) => Some(id),
            ModalPhase::Submitting(id) => id,
            _ => None,
        }
    }

    fn is_editable(&self) -> bool {
        matches!(
            self,
            ModalPhase::OpenNew
                | ModalPhase::OpenNewWithErrors
                | ModalPhase::Populated(_)
                | ModalPhase::PopulatedWithErrors(_)
        )
    }

    fn settled(id: Option<RecordId>) -> Self {
        id.map_or(ModalPhase::OpenNew, ModalPhase::Populated)
    }

    fn with_errors(id: Option<RecordId>) -> Self {
        id.map_or(ModalPhase::OpenNewWithErrors, ModalPhase::PopulatedWithErrors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("el formulario no está abierto")]
    NotEditable,
    #[error("ya se está guardando")]
    InFlight,
    #[error("hay campos con errores")]
    Invalid,
}

/// The save request a successful `submit` asks the page to send.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub id: Option<RecordId>,
    pub values: FormValues,
}

/// What a completed save leaves behind for the list.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRecord {
    /// Backend identity; `None` when a create answered without one.
    pub id: Option<RecordId>,
    pub created: bool,
    pub values: FormValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    fields: &'static [FormField],
    phase: ModalPhase,
    values: FormValues,
    errors: FieldErrors,
    alert: Option<String>,
    focus: Option<&'static str>,
}

impl FormController {
    pub fn new(fields: &'static [FormField]) -> Self {
        Self {
            fields,
            phase: ModalPhase::Closed,
            values: FormValues::new(),
            errors: FieldErrors::new(),
            alert: None,
            focus: None,
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        self.fields
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// First inline message for `name`.
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Field that should receive focus next, consumed by the view.
    pub fn take_focus(&mut self) -> Option<&'static str> {
        self.focus.take()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, ModalPhase::Submitting(_))
    }

    pub fn open_new(&mut self) {
        self.values = blank_values(self.fields);
        self.errors.clear();
        self.alert = None;
        self.focus = self.fields.first().map(|f| f.name);
        self.phase = ModalPhase::OpenNew;
    }

    /// Returns the id whose detail must be fetched.
    pub fn open_edit(&mut self, id: RecordId) -> RecordId {
        self.values = blank_values(self.fields);
        self.errors.clear();
        self.alert = None;
        self.focus = None;
        self.phase = ModalPhase::FetchingDetail(id);
        id
    }

    /// Binds fetched fields. Ignored unless we are still waiting for this id.
    pub fn detail_loaded(&mut self, id: RecordId, detail: &Value) -> bool {
        if self.phase != ModalPhase::FetchingDetail(id) {
            return false;
        }
        self.values = values_from_detail(self.fields, detail);
        self.focus = self.fields.first().map(|f| f.name);
        self.phase = ModalPhase::Populated(id);
        true
    }

    pub fn detail_failed(&mut self, id: RecordId, message: impl Into<String>) {
        if self.phase == ModalPhase::FetchingDetail(id) {
            self.alert = Some(message.into());
            self.phase = ModalPhase::Closed;
        }
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if self.phase.is_editable() {
            self.values.insert(name.to_string(), value.into());
        }
    }

    /// Validates locally and, if clean, moves to `Submitting`.
    pub fn submit(&mut self) -> Result<SubmitRequest, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }
        if !self.phase.is_editable() {
            return Err(SubmitBlocked::NotEditable);
        }
        let id = self.phase.editing();
        let errors = validate(self.fields, &self.values);
        if !errors.is_empty() {
            self.focus = self.first_field_in(&errors);
            self.errors = errors;
            self.phase = ModalPhase::with_errors(id);
            return Err(SubmitBlocked::Invalid);
        }
        self.errors.clear();
        self.alert = None;
        self.phase = ModalPhase::Submitting(id);
        Ok(SubmitRequest {
            id,
            values: self.values.clone(),
        })
    }

    /// Closes the modal after a successful save.
    pub fn save_succeeded(&mut self, backend_id: Option<RecordId>) -> Option<SavedRecord> {
        let ModalPhase::Submitting(editing) = self.phase else {
            return None;
        };
        let saved = SavedRecord {
            id: editing.or(backend_id),
            created: editing.is_none(),
            values: std::mem::take(&mut self.values),
        };
        self.errors.clear();
        self.phase = ModalPhase::Closed;
        Some(saved)
    }

    /// Keeps the modal open with the typed values; field errors go inline, the rest to an alert.
    pub fn save_failed(&mut self, error: ApiError) {
        let ModalPhase::Submitting(editing) = self.phase else {
            return;
        };
        match error {
            ApiError::Validation(errors) => {
                self.focus = self.first_field_in(&errors);
                self.errors = errors;
                self.phase = ModalPhase::with_errors(editing);
            }
            other => {
                self.alert = Some(other.to_string());
                self.phase = ModalPhase::settled(editing);
            }
        }
    }

    /// Dismiss. Refused while a save is in flight.
    pub fn close(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = ModalPhase::Closed;
        self.errors.clear();
        self.focus = None;
        true
    }

    fn first_field_in(&self, errors: &FieldErrors) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| errors.contains_key(f.name))
            .map(|f| f.name)
    }
}

fn blank_values(fields: &[FormField]) -> FormValues {
    fields
        .iter()
        .map(|f| {
            let initial = match f.kind {
                FieldKind::Bool => "false",
                FieldKind::Choice(options) if f.required => {
                    options.first().map(|(value, _)| *value).unwrap_or("")
                }
                _ => "",
            };
            (f.name.to_string(), initial.to_string())
        })
        .collect()
}

/// Reads a flat detail object into input text. Nested `{id, ...}` objects bind by id.
pub fn values_from_detail(fields: &[FormField], detail: &Value) -> FormValues {
    fields
        .iter()
        .map(|f| {
            let text = match detail.get(f.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Object(obj)) => match obj.get("id") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => String::new(),
                },
                _ if f.kind == FieldKind::Bool => "false".to_string(),
                _ => String::new(),
            };
            (f.name.to_string(), text)
        })
        .collect()
}

pub fn validate(fields: &[FormField], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in fields {
        let raw = values.get(field.name).map(|v| v.trim()).unwrap_or("");
        let message = if raw.is_empty() {
            field.required.then_some(REQUIRED_MESSAGE)
        } else {
            match field.kind {
                FieldKind::Integer if raw.parse::<i64>().is_err() => Some(NUMBER_MESSAGE),
                FieldKind::Decimal if parse_decimal(raw).is_none() => Some(NUMBER_MESSAGE),
                FieldKind::Date if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() => {
                    Some(DATE_MESSAGE)
                }
                FieldKind::Email if !looks_like_email(raw) => Some(EMAIL_MESSAGE),
                FieldKind::Choice(options) if !options.iter().any(|(v, _)| *v == raw) => {
                    Some(CHOICE_MESSAGE)
                }
                _ => None,
            }
        };
        if let Some(message) = message {
            errors.insert(field.name.to_string(), vec![message.to_string()]);
        }
    }
    errors
}

/// Accepts `1234.5`, `1234,5` and `1.234,50`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn looks_like_email(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// JSON body for a save: typed per field kind, blanks become `null`, `id` included when editing.
pub fn json_body(fields: &[FormField], values: &FormValues, id: Option<RecordId>) -> Value {
    let mut body = Map::new();
    if let Some(id) = id {
        body.insert("id".to_string(), Value::from(id.value()));
    }
    for field in fields {
        let raw = values.get(field.name).map(|v| v.trim()).unwrap_or("");
        let value = match field.kind {
            FieldKind::Bool => Value::Bool(raw == "true"),
            _ if raw.is_empty() => Value::Null,
            FieldKind::Integer => raw.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            FieldKind::Decimal => parse_decimal(raw)
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::String(raw.to_string()),
        };
        body.insert(field.name.to_string(), value);
    }
    Value::Object(body)
}

/// `application/x-www-form-urlencoded` body for a save.
pub fn form_body(values: &FormValues, id: Option<RecordId>) -> Result<String, ApiError> {
    let mut pairs: BTreeMap<&str, &str> = values
        .iter()
        .map(|(k, v)| (k.as_str(), v.trim()))
        .collect();
    let id_text = id.map(|id| id.as_string());
    if let Some(id_text) = id_text.as_deref() {
        pairs.insert("id", id_text);
    }
    serde_qs::to_string(&pairs).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pending-delete reference for the confirm dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteFlow {
    pending: Option<RecordId>,
    in_flight: bool,
}

impl DeleteFlow {
    pub fn pending(&self) -> Option<RecordId> {
        self.pending
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Destructive-intent click: remember the identity only.
    pub fn arm(&mut self, id: RecordId) {
        if !self.in_flight {
            self.pending = Some(id);
        }
    }

    /// Cancel or dismiss: forget the pending id, no request.
    pub fn dismiss(&mut self) {
        if !self.in_flight {
            self.pending = None;
        }
    }

    /// Returns the id to delete, once per armed reference.
    pub fn confirm(&mut self) -> Option<RecordId> {
        if self.in_flight {
            return None;
        }
        let id = self.pending?;
        self.in_flight = true;
        Some(id)
    }

    /// Backend confirmed; returns the id to drop from the list.
    pub fn completed(&mut self) -> Option<RecordId> {
        self.in_flight = false;
        self.pending.take()
    }

    pub fn failed(&mut self) {
        self.in_flight = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_response::Envelope;
    use serde_json::json;

    const ESTADOS: &[(&str, &str)] = &[("en_cartera", "En cartera"), ("depositado", "Depositado")];

    const FIELDS: &[FormField] = &[
        FormField::required("nombre", "Nombre", FieldKind::Text),
        FormField::optional("email", "Email", FieldKind::Email),
        FormField::optional("importe", "Importe", FieldKind::Decimal),
        FormField::optional("fecha", "Fecha", FieldKind::Date),
        FormField::optional("activo", "Activo", FieldKind::Bool),
        FormField::required("estado", "Estado", FieldKind::Choice(ESTADOS)),
    ];

    #[test]
    fn open_new_blanks_identity_and_focuses_first_field() {
        let mut form = FormController::new(FIELDS);
        form.open_new();
        assert_eq!(form.phase(), ModalPhase::OpenNew);
        assert_eq!(form.phase().editing(), None);
        assert_eq!(form.value("nombre"), "");
        assert_eq!(form.value("activo"), "false");
        assert_eq!(form.value("estado"), "en_cartera");
        assert_eq!(form.take_focus(), Some("nombre"));
        assert_eq!(form.take_focus(), None);
    }

    #[test]
    fn client_validation_blocks_submit_and_focuses_first_invalid() {
        let mut form = FormController::new(FIELDS);
        form.open_new();
        form.set_value("nombre", "   ");
        form.set_value("email", "sin-arroba");

        assert_eq!(form.submit(), Err(SubmitBlocked::Invalid));
        assert_eq!(form.phase(), ModalPhase::OpenNewWithErrors);
        assert_eq!(form.error_for("nombre"), Some(REQUIRED_MESSAGE));
        assert_eq!(form.error_for("email"), Some(EMAIL_MESSAGE));
        assert_eq!(form.take_focus(), Some("nombre"));
    }

    #[test]
    fn edit_flow_fetches_then_populates() {
        let mut form = FormController::new(FIELDS);
        let id = form.open_edit(RecordId(7));
        assert_eq!(id, RecordId(7));
        assert_eq!(form.phase(), ModalPhase::FetchingDetail(RecordId(7)));

        // A late answer for another record is ignored.
        assert!(!form.detail_loaded(RecordId(8), &json!({"nombre": "Otro"})));

        let detail = json!({"id": 7, "nombre": "Banco Sur", "importe": 1500.5, "activo": true, "estado": "depositado"});
        assert!(form.detail_loaded(RecordId(7), &detail));
        assert_eq!(form.phase(), ModalPhase::Populated(RecordId(7)));
        assert_eq!(form.value("nombre"), "Banco Sur");
        assert_eq!(form.value("importe"), "1500.5");
        assert_eq!(form.value("activo"), "true");
        assert_eq!(form.value("email"), "");
    }

    #[test]
    fn detail_failure_alerts_and_closes() {
        let mut form = FormController::new(FIELDS);
        form.open_edit(RecordId(3));
        form.detail_failed(RecordId(3), "Error de conexión: timeout");
        assert_eq!(form.phase(), ModalPhase::Closed);
        assert_eq!(form.take_alert().as_deref(), Some("Error de conexión: timeout"));
    }

    #[test]
    fn double_submit_is_refused() {
        let mut form = FormController::new(FIELDS);
        form.open_new();
        form.set_value("nombre", "Nuevo");
        let request = form.submit().unwrap();
        assert_eq!(request.id, None);
        assert_eq!(form.phase(), ModalPhase::Submitting(None));
        assert_eq!(form.submit(), Err(SubmitBlocked::InFlight));
        assert!(!form.close());
    }

    #[test]
    fn backend_field_errors_keep_modal_open_with_values() {
        let mut form = FormController::new(FIELDS);
        form.open_new();
        form.set_value("nombre", "x");
        form.submit().unwrap();

        let response = Envelope::parse(
            r#"{"ok": false, "errors": {"nombre": ["El nombre es obligatorio."]}}"#,
            None,
        );
        form.save_failed(response.into_result().unwrap_err());

        assert!(form.phase().is_open());
        assert_eq!(form.phase(), ModalPhase::OpenNewWithErrors);
        assert_eq!(form.error_for("nombre"), Some("El nombre es obligatorio."));
        assert_eq!(form.value("nombre"), "x");
        assert_eq!(form.take_focus(), Some("nombre"));
    }

    #[test]
    fn hard_failure_alerts_and_keeps_modal_open() {
        let mut form = FormController::new(FIELDS);
        form.open_edit(RecordId(4));
        form.detail_loaded(RecordId(4), &json!({"nombre": "Cuatro", "estado": "en_cartera"}));
        form.submit().unwrap();

        form.save_failed(ApiError::Rejected("No se pudo guardar".into()));
        assert_eq!(form.phase(), ModalPhase::Populated(RecordId(4)));
        assert_eq!(form.alert(), Some("No se pudo guardar"));
        assert_eq!(form.value("nombre"), "Cuatro");
    }

    #[test]
    fn success_closes_and_reports_identity() {
        let mut form = FormController::new(FIELDS);
        form.open_new();
        form.set_value("nombre", "Nuevo");
        form.submit().unwrap();
        let saved = form.save_succeeded(Some(RecordId(31))).unwrap();
        assert_eq!(saved.id, Some(RecordId(31)));
        assert!(saved.created);
        assert_eq!(saved.values["nombre"], "Nuevo");
        assert_eq!(form.phase(), ModalPhase::Closed);
        assert!(form.save_succeeded(None).is_none());
    }

    #[test]
    fn json_body_types_values() {
        let mut values = FormValues::new();
        values.insert("nombre".into(), " Ana ".into());
        values.insert("importe".into(), "1.234,50".into());
        values.insert("activo".into(), "true".into());
        values.insert("fecha".into(), "".into());
        values.insert("estado".into(), "depositado".into());

        let body = json_body(FIELDS, &values, Some(RecordId(5)));
        assert_eq!(
            body,
            json!({
                "id": 5,
                "nombre": "Ana",
                "email": null,
                "importe": 1234.5,
                "fecha": null,
                "activo": true,
                "estado": "depositado"
            })
        );
    }

    #[test]
    fn form_body_is_url_encoded() {
        let mut values = FormValues::new();
        values.insert("nombre".into(), "Pérez & Hijos".into());
        let body = form_body(&values, Some(RecordId(2))).unwrap();
        assert!(body.contains("id=2"));
        assert!(body.contains("nombre=P%C3%A9rez+%26+Hijos") || body.contains("nombre=P%C3%A9rez%20%26%20Hijos"));
    }

    #[test]
    fn delete_dismiss_never_yields_a_request() {
        let mut flow = DeleteFlow::default();
        flow.arm(RecordId(7));
        flow.dismiss();
        assert_eq!(flow.pending(), None);
        assert_eq!(flow.confirm(), None);
    }

    #[test]
    fn delete_confirm_yields_once_then_completes() {
        let mut flow = DeleteFlow::default();
        flow.arm(RecordId(7));
        assert_eq!(flow.confirm(), Some(RecordId(7)));
        assert_eq!(flow.confirm(), None);
        assert_eq!(flow.completed(), Some(RecordId(7)));
        assert_eq!(flow.pending(), None);
        assert!(!flow.is_in_flight());
    }

    #[test]
    fn delete_row_seven_from_loaded_list() {
        use crate::domain::a003_rubro::aggregate::Rubro;
        use crate::shared::list_view::ListController;

        let rubros: Vec<Rubro> = serde_json::from_value(json!([
            {"id": 5, "nombre": "Ferretería"},
            {"id": 7, "nombre": "Pinturería"},
            {"id": 9, "nombre": "Electricidad"}
        ]))
        .unwrap();
        let mut list: ListController<Rubro> = ListController::new(10, 2);
        let ticket = list.begin_load();
        assert!(list.finish_load(ticket, rubros));

        let mut flow = DeleteFlow::default();
        let mut requests = Vec::new();

        // Dismissed: no request, nothing removed.
        flow.arm(RecordId(7));
        flow.dismiss();
        requests.extend(flow.confirm());
        assert!(requests.is_empty());
        assert_eq!(list.records().len(), 3);

        // Confirmed: one request, then row 7 leaves the list.
        flow.arm(RecordId(7));
        requests.extend(flow.confirm());
        requests.extend(flow.confirm());
        assert_eq!(requests, vec![RecordId(7)]);
        if let Some(id) = flow.completed() {
            assert!(list.remove(id));
        }
        let ids: Vec<RecordId> = list.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(5), RecordId(9)]);
        assert_eq!(flow.pending(), None);
    }

    #[test]
    fn decimals_in_both_notations() {
        assert_eq!(parse_decimal("1234.5"), Some(1234.5));
        assert_eq!(parse_decimal("1234,5"), Some(1234.5));
        assert_eq!(parse_decimal("1.234,50"), Some(1234.5));
        assert_eq!(parse_decimal("abc"), None);
    }
}
