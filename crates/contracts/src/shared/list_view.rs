//! Client-side list view: filter → paginate → view.
//!
//! A page keeps one [`ListController`] per list. Every user interaction is a
//! [`ListAction`] passed to [`ListController::dispatch`]; the page then redraws
//! from [`ListController::view`]. Page changes never go back to the backend.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;

use crate::domain::common::{HasRecordId, RecordId};
use crate::shared::pagination::{pagination_model, PaginationModel, DEFAULT_WINDOW_RADIUS};

/// Enum filter value that disables the predicate.
pub const ALL: &str = "all";

/// A named field value exposed to enum filters.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Bool(bool),
    Int(i64),
}

impl FieldValue<'_> {
    fn matches(&self, wanted: &str) -> bool {
        match self {
            FieldValue::Text(value) => value.as_ref() == wanted,
            FieldValue::Bool(value) => parse_flag(wanted) == Some(*value),
            FieldValue::Int(value) => wanted.trim().parse::<i64>().ok() == Some(*value),
        }
    }

    pub fn to_filter_value(&self) -> String {
        match self {
            FieldValue::Text(value) => value.to_string(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Int(value) => value.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" | "si" | "sí" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Records that can be searched and filtered on the client.
pub trait Filterable {
    /// Fields scanned by the free-text search. `None` marks a missing field.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Value of a named field for enum filters, `None` when the record lacks it.
    fn field_value(&self, name: &str) -> Option<FieldValue<'_>>;
}

fn is_bypass(wanted: &str) -> bool {
    let wanted = wanted.trim();
    wanted.is_empty() || wanted.eq_ignore_ascii_case(ALL)
}

fn matches_text<T: Filterable>(record: &T, needle_lower: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle_lower))
}

fn matches_enum<T: Filterable>(record: &T, name: &str, wanted: &str) -> bool {
    if is_bypass(wanted) {
        return true;
    }
    match record.field_value(name) {
        Some(value) => value.matches(wanted),
        // A missing flag reads as `false`; any other missing field never matches.
        None => parse_flag(wanted) == Some(false),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub text: String,
    pub enums: BTreeMap<String, String>,
    pub page_size: usize,
}

impl FilterState {
    pub fn new(page_size: usize) -> Self {
        Self {
            text: String::new(),
            enums: BTreeMap::new(),
            page_size: page_size.max(1),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_enum(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.enums.insert(name.into(), value.into());
        self
    }

    pub fn enum_value(&self, name: &str) -> &str {
        self.enums.get(name).map(String::as_str).unwrap_or(ALL)
    }

    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty() || self.enums.values().any(|v| !is_bypass(v))
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        let needle = self.text.trim().to_lowercase();
        if !needle.is_empty() && !matches_text(record, &needle) {
            return false;
        }
        self.enums
            .iter()
            .all(|(name, wanted)| matches_enum(record, name, wanted))
    }
}

/// Records matching every predicate of `filter`, in input order.
pub fn apply_filters<'a, T: Filterable>(records: &'a [T], filter: &FilterState) -> Vec<&'a T> {
    records.iter().filter(|r| filter.matches(*r)).collect()
}

/// Byte ranges of case-insensitive occurrences of `needle` in `text`, for
/// highlighting. Empty when lowercasing changes any character's byte length,
/// since offsets in the lowered text would not be char boundaries of `text`.
pub fn match_ranges(text: &str, needle: &str) -> Vec<Range<usize>> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut lower = String::with_capacity(text.len());
    for c in text.chars() {
        let before = lower.len();
        lower.extend(c.to_lowercase());
        if lower.len() - before != c.len_utf8() {
            return Vec::new();
        }
    }
    let needle = needle.to_lowercase();
    lower
        .match_indices(needle.as_str())
        .map(|(start, m)| start..start + m.len())
        .collect()
}

/// Distinct values of a named field across `records`, for data-driven filter options.
/// Numbers sort by value and come before text.
pub fn distinct_values<T: Filterable>(records: &[T], name: &str) -> Vec<String> {
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|r| r.field_value(name).map(|v| v.to_filter_value()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    values.sort_by(|a, b| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    values
}

/// "start–end de total" counters under a table. All zero for an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSummary {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for RangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} de {}", self.start, self.end, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    pub range: RangeSummary,
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Keeps `page` inside `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice of `records` for 1-based `page`. The caller clamps `page` beforehand.
pub fn paginate<T>(records: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = records.len();
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    let items = &records[start..end];
    let range = if items.is_empty() {
        RangeSummary { start: 0, end: 0, total }
    } else {
        RangeSummary { start: start + 1, end, total }
    };
    Page {
        items,
        total_pages: total_pages(total, page_size),
        range,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    SetText(String),
    SetEnum { name: String, value: String },
    ClearFilters,
    SetPageSize(usize),
    GoToPage(usize),
    NextPage,
    PrevPage,
}

/// Issued by [`ListController::begin_load`]; only the newest ticket may replace the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What the table, the pagination control and the counters render.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub range: RangeSummary,
    pub pagination: Option<PaginationModel>,
}

#[derive(Debug, Clone)]
pub struct ListController<T> {
    records: Vec<T>,
    filter: FilterState,
    page: usize,
    window_radius: usize,
    generation: u64,
    is_loading: bool,
    is_loaded: bool,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self::new(10, DEFAULT_WINDOW_RADIUS)
    }
}

impl<T> ListController<T> {
    pub fn new(page_size: usize, window_radius: usize) -> Self {
        Self {
            records: Vec::new(),
            filter: FilterState::new(page_size),
            page: 1,
            window_radius,
            generation: 0,
            is_loading: false,
            is_loaded: false,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Starts a fetch. Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.is_loading = true;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Ends a failed fetch without touching the data. Returns `false` for a
    /// stale ticket, whose failure must not be shown.
    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.is_loading = false;
        true
    }
}

impl<T: Filterable + HasRecordId + Clone> ListController<T> {
    /// Installs fetched records. Returns `false` (and changes nothing) for a stale ticket.
    pub fn finish_load(&mut self, ticket: LoadTicket, records: Vec<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.records = records;
        self.is_loading = false;
        self.is_loaded = true;
        self.clamp();
        true
    }

    /// The single mutation entry point for filter and pagination state.
    pub fn dispatch(&mut self, action: ListAction) {
        match action {
            ListAction::SetText(text) => {
                self.filter.text = text;
                self.page = 1;
            }
            ListAction::SetEnum { name, value } => {
                self.filter.enums.insert(name, value);
                self.page = 1;
            }
            ListAction::ClearFilters => {
                self.filter.text.clear();
                self.filter.enums.clear();
                self.page = 1;
            }
            ListAction::SetPageSize(size) => {
                self.filter.page_size = size.max(1);
                self.page = 1;
            }
            ListAction::GoToPage(page) => self.page = page,
            ListAction::NextPage => self.page = self.page.saturating_add(1),
            ListAction::PrevPage => self.page = self.page.saturating_sub(1),
        }
        self.clamp();
    }

    /// Replaces the record with the same id, or appends it.
    pub fn upsert(&mut self, record: T) {
        let id = record.record_id();
        match self.records.iter_mut().find(|r| r.record_id() == id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.clamp();
    }

    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.record_id() != id);
        self.clamp();
        self.records.len() != before
    }

    pub fn filtered(&self) -> Vec<&T> {
        apply_filters(&self.records, &self.filter)
    }

    pub fn view(&self) -> ListView<T> {
        let filtered = self.filtered();
        let page = paginate(&filtered, self.page, self.filter.page_size);
        ListView {
            rows: page.items.iter().map(|r| (*r).clone()).collect(),
            page: self.page,
            total_pages: page.total_pages,
            range: page.range,
            pagination: pagination_model(self.page, page.total_pages, self.window_radius),
        }
    }

    fn clamp(&mut self) {
        let count = self.filtered().len();
        self.page = clamp_page(self.page, total_pages(count, self.filter.page_size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        nombre: String,
        email: Option<String>,
        estado: Option<&'static str>,
        activo: Option<bool>,
    }

    fn row(id: i64, nombre: &str, estado: &'static str, activo: bool) -> Row {
        Row {
            id,
            nombre: nombre.to_string(),
            email: None,
            estado: Some(estado),
            activo: Some(activo),
        }
    }

    impl Filterable for Row {
        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![Some(self.nombre.as_str()), self.email.as_deref()]
        }

        fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "estado" => self.estado.map(|e| FieldValue::Text(e.into())),
                "activo" => self.activo.map(FieldValue::Bool),
                "id" => Some(FieldValue::Int(self.id)),
                _ => None,
            }
        }
    }

    impl HasRecordId for Row {
        fn record_id(&self) -> RecordId {
            RecordId(self.id)
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row(1, "Ferretería Norte", "pendiente", true),
            row(2, "Almacén Sur", "aprobado", true),
            row(3, "FERRETERÍA CENTRAL", "aprobado", false),
            row(4, "Kiosco Oeste", "pendiente", true),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn text_filter_is_case_insensitive_substring() {
        let data = sample();
        let filter = FilterState::new(10).with_text("ferret");
        assert_eq!(ids(&apply_filters(&data, &filter)), vec![1, 3]);
    }

    #[test]
    fn enum_filter_is_exact_and_all_bypasses() {
        let data = sample();
        let filter = FilterState::new(10).with_enum("estado", "aprobado");
        assert_eq!(ids(&apply_filters(&data, &filter)), vec![2, 3]);

        let filter = FilterState::new(10).with_enum("estado", "aprob");
        assert!(apply_filters(&data, &filter).is_empty());

        let filter = FilterState::new(10).with_enum("estado", ALL);
        assert_eq!(apply_filters(&data, &filter).len(), 4);
    }

    #[test]
    fn text_and_enum_combine_and_keep_input_order() {
        let data = sample();
        let filter = FilterState::new(10)
            .with_text("e")
            .with_enum("estado", "pendiente");
        let result = apply_filters(&data, &filter);
        assert_eq!(ids(&result), vec![1, 4]);
        for r in result {
            assert!(r.nombre.to_lowercase().contains('e'));
            assert_eq!(r.estado, Some("pendiente"));
        }
    }

    #[test]
    fn missing_fields_never_match_text_and_read_false_for_flags() {
        let mut data = sample();
        data.push(Row {
            id: 5,
            nombre: String::new(),
            email: None,
            estado: None,
            activo: None,
        });

        let by_email = FilterState::new(10).with_text("@");
        assert!(apply_filters(&data, &by_email).is_empty());

        let inactive = FilterState::new(10).with_enum("activo", "false");
        assert_eq!(ids(&apply_filters(&data, &inactive)), vec![3, 5]);

        let by_estado = FilterState::new(10).with_enum("estado", "pendiente");
        assert_eq!(ids(&apply_filters(&data, &by_estado)), vec![1, 4]);
    }

    #[test]
    fn paginate_partitions_without_gaps_or_duplicates() {
        let data: Vec<i32> = (1..=23).collect();
        let first = paginate(&data, 1, 10);
        assert_eq!(first.total_pages, 3);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            seen.extend_from_slice(paginate(&data, page, 10).items);
        }
        assert_eq!(seen, data);
    }

    #[test]
    fn paginate_is_idempotent() {
        let data: Vec<i32> = (1..=7).collect();
        assert_eq!(paginate(&data, 2, 3), paginate(&data, 2, 3));
    }

    #[test]
    fn empty_input_has_zero_pages_and_zero_range() {
        let data: Vec<i32> = Vec::new();
        let page = paginate(&data, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.range.to_string(), "0–0 de 0");
        assert_eq!(clamp_page(5, page.total_pages), 1);
    }

    #[test]
    fn clamp_page_stays_in_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        assert_eq!(
            distinct_values(&sample(), "estado"),
            vec!["aprobado".to_string(), "pendiente".to_string()]
        );
    }

    #[test]
    fn match_ranges_are_case_insensitive_byte_ranges() {
        let text = "Ferretería FERRETERÍA";
        let ranges = match_ranges(text, "tería");
        assert_eq!(ranges.len(), 2);
        assert_eq!(&text[ranges[0].clone()], "tería");
        assert_eq!(&text[ranges[1].clone()], "TERÍA");
        assert!(match_ranges(text, "  ").is_empty());
        assert!(match_ranges(text, "kiosco").is_empty());
    }

    #[test]
    fn match_ranges_skip_text_whose_lowercase_shifts_bytes() {
        // Same total byte length once lowered, different per-char widths.
        assert_eq!("Ⱥẞ".len(), "Ⱥẞ".to_lowercase().len());
        assert!(match_ranges("Ⱥẞ", "ß").is_empty());
        assert!(match_ranges("İstanbul", "stan").is_empty());
    }

    #[test]
    fn distinct_numbers_sort_by_value() {
        let rows: Vec<Row> = (1..=11).rev().map(|i| row(i, "x", "pendiente", true)).collect();
        let expected: Vec<String> = (1..=11).map(|i| i.to_string()).collect();
        assert_eq!(distinct_values(&rows, "id"), expected);
    }

    fn loaded(rows: Vec<Row>, page_size: usize) -> ListController<Row> {
        let mut ctrl = ListController::new(page_size, 2);
        let ticket = ctrl.begin_load();
        assert!(ctrl.finish_load(ticket, rows));
        ctrl
    }

    #[test]
    fn controller_resets_page_on_filter_change_and_clamps_navigation() {
        let rows = (1..=25).map(|i| row(i, &format!("Cliente {}", i), "pendiente", true)).collect();
        let mut ctrl = loaded(rows, 10);

        ctrl.dispatch(ListAction::GoToPage(3));
        assert_eq!(ctrl.page(), 3);
        ctrl.dispatch(ListAction::NextPage);
        assert_eq!(ctrl.page(), 3);

        ctrl.dispatch(ListAction::SetText("cliente 2".into()));
        assert_eq!(ctrl.page(), 1);
        // "Cliente 2" and "Cliente 20".."Cliente 25"
        assert_eq!(ctrl.view().range.to_string(), "1–7 de 7");

        ctrl.dispatch(ListAction::PrevPage);
        assert_eq!(ctrl.page(), 1);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut ctrl: ListController<Row> = ListController::new(10, 2);
        let old = ctrl.begin_load();
        let new = ctrl.begin_load();

        assert!(ctrl.finish_load(new, sample()));
        assert!(!ctrl.finish_load(old, vec![row(99, "Viejo", "pendiente", true)]));
        assert_eq!(ctrl.records().len(), 4);
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn stale_failure_is_not_reported() {
        let mut ctrl: ListController<Row> = ListController::new(10, 2);
        let old = ctrl.begin_load();
        let new = ctrl.begin_load();

        assert!(ctrl.finish_load(new, sample()));
        assert!(!ctrl.fail_load(old));
        assert_eq!(ctrl.records().len(), 4);
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn current_failure_is_reported_and_stops_loading() {
        let mut ctrl: ListController<Row> = loaded(sample(), 10);
        let ticket = ctrl.begin_load();
        assert!(ctrl.is_loading());
        assert!(ctrl.fail_load(ticket));
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.records().len(), 4);
    }

    #[test]
    fn upsert_replaces_or_appends_and_remove_clamps_page() {
        let rows = (1..=11).map(|i| row(i, "x", "pendiente", true)).collect();
        let mut ctrl = loaded(rows, 10);
        ctrl.dispatch(ListAction::GoToPage(2));

        ctrl.upsert(row(11, "renombrado", "aprobado", true));
        assert_eq!(ctrl.records().len(), 11);
        assert_eq!(ctrl.view().rows[0].nombre, "renombrado");

        assert!(ctrl.remove(RecordId(11)));
        assert_eq!(ctrl.page(), 1);
        assert!(!ctrl.remove(RecordId(11)));

        ctrl.upsert(row(12, "nuevo", "pendiente", true));
        assert_eq!(ctrl.records().last().map(|r| r.id), Some(12));
    }

    #[test]
    fn view_carries_pagination_only_when_needed() {
        let ctrl = loaded(sample(), 10);
        assert!(ctrl.view().pagination.is_none());

        let ctrl = loaded(sample(), 2);
        let model = ctrl.view().pagination.unwrap();
        assert_eq!(model.total_pages, 2);
        assert!(!model.prev_enabled);
    }
}
