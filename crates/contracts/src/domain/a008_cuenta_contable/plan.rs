//! Plan de cuentas: flattening the nested tree into indented table rows.

use thiserror::Error;

use super::aggregate::{CuentaContable, TipoCuenta};
use crate::domain::common::{EnumFilterDef, FilterOptions, HasRecordId, RecordId};
use crate::shared::list_view::{FieldValue, Filterable};

/// Pixels of indentation per level below the root.
pub const INDENT_UNIT_PX: u32 = 20;

pub const PLAN_PATH: &str = "/api/contabilidad/plan-cuentas/";
pub const PLAN_COLLECTION_KEY: &str = "cuentas";

pub const PLAN_FILTERS: &[EnumFilterDef] = &[
    EnumFilterDef {
        name: "tipo",
        label: "Tipo",
        options: FilterOptions::Fixed(&[
            ("all", "Todos"),
            ("activo", "Activo"),
            ("pasivo", "Pasivo"),
            ("patrimonio_neto", "Patrimonio neto"),
            ("ingreso", "Ingreso"),
            ("egreso", "Egreso"),
        ]),
    },
    EnumFilterDef {
        name: "imputable",
        label: "Imputable",
        options: FilterOptions::Fixed(&[("all", "Todas"), ("true", "Imputables"), ("false", "De agrupación")]),
    },
    EnumFilterDef {
        name: "nivel",
        label: "Nivel",
        options: FilterOptions::FromData,
    },
];

/// One account in display order. `nivel` is the backend's, never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct CuentaRow {
    pub id: RecordId,
    pub codigo: String,
    pub nombre: String,
    pub tipo: TipoCuenta,
    pub imputable: bool,
    pub nivel: u32,
    pub padre_id: Option<RecordId>,
    pub has_children: bool,
}

impl CuentaRow {
    pub fn indent_px(&self) -> u32 {
        indent_px(self.nivel)
    }
}

pub fn indent_px(nivel: u32) -> u32 {
    nivel.saturating_sub(1).saturating_mul(INDENT_UNIT_PX)
}

/// Pre-order traversal: a node, then its children in given order, then the next sibling.
pub fn flatten(forest: &[CuentaContable]) -> Vec<CuentaRow> {
    fn visit(node: &CuentaContable, out: &mut Vec<CuentaRow>) {
        out.push(CuentaRow {
            id: node.id,
            codigo: node.codigo.clone(),
            nombre: node.nombre.clone(),
            tipo: node.tipo,
            imputable: node.imputable,
            nivel: node.nivel,
            padre_id: node.padre_id,
            has_children: !node.children.is_empty(),
        });
        for child in &node.children {
            visit(child, out);
        }
    }

    let mut out = Vec::new();
    for root in forest {
        visit(root, &mut out);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("la cuenta {codigo} tiene nivel {nivel}, se esperaba {expected}")]
pub struct LevelMismatch {
    pub codigo: String,
    pub nivel: u32,
    pub expected: u32,
}

/// Checks `child.nivel == parent.nivel + 1` (and roots at level 1) across the forest.
pub fn check_levels(forest: &[CuentaContable]) -> Result<(), LevelMismatch> {
    fn check(node: &CuentaContable, expected: u32) -> Result<(), LevelMismatch> {
        if node.nivel != expected {
            return Err(LevelMismatch {
                codigo: node.codigo.clone(),
                nivel: node.nivel,
                expected,
            });
        }
        node.children.iter().try_for_each(|c| check(c, node.nivel + 1))
    }
    forest.iter().try_for_each(|root| check(root, 1))
}

impl Filterable for CuentaRow {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.codigo.as_str()), Some(self.nombre.as_str())]
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "tipo" => Some(FieldValue::Text(self.tipo.as_str().into())),
            "imputable" => Some(FieldValue::Bool(self.imputable)),
            "nivel" => Some(FieldValue::Int(i64::from(self.nivel))),
            _ => None,
        }
    }
}

impl HasRecordId for CuentaRow {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_response::Envelope;
    use crate::shared::list_view::{ListAction, ListController};
    use serde_json::json;

    fn plan_json() -> serde_json::Value {
        json!({
            "success": true,
            "cuentas": [
                {"id": 1, "codigo": "1", "nombre": "Activo", "tipo": "activo", "nivel": 1, "children": [
                    {"id": 2, "codigo": "1.1", "nombre": "Caja y bancos", "tipo": "activo", "nivel": 2, "padre_id": 1, "children": [
                        {"id": 3, "codigo": "1.1.01", "nombre": "Caja", "tipo": "activo", "imputable": true, "nivel": 3, "padre_id": 2},
                        {"id": 4, "codigo": "1.1.02", "nombre": "Banco Nación", "tipo": "activo", "imputable": true, "nivel": 3, "padre_id": 2}
                    ]},
                    {"id": 5, "codigo": "1.2", "nombre": "Créditos", "tipo": "activo", "nivel": 2, "padre_id": 1}
                ]},
                {"id": 6, "codigo": "2", "nombre": "Pasivo", "tipo": "pasivo", "nivel": 1}
            ]
        })
    }

    fn plan() -> Vec<CuentaContable> {
        Envelope::from_value(plan_json(), Some(PLAN_COLLECTION_KEY))
            .records()
            .unwrap()
    }

    #[test]
    fn flatten_is_preorder() {
        let rows = flatten(&plan());
        let codes: Vec<&str> = rows.iter().map(|r| r.codigo.as_str()).collect();
        assert_eq!(codes, vec!["1", "1.1", "1.1.01", "1.1.02", "1.2", "2"]);
    }

    #[test]
    fn parents_come_before_children_one_level_up() {
        let rows = flatten(&plan());
        for (i, row) in rows.iter().enumerate() {
            if let Some(parent) = row.padre_id {
                let p = rows.iter().position(|r| r.id == parent).unwrap();
                assert!(p < i);
                assert_eq!(rows[p].nivel + 1, row.nivel);
            }
        }
        assert!(check_levels(&plan()).is_ok());
    }

    #[test]
    fn nivel_is_taken_from_backend() {
        let mut forest = plan();
        forest[1].nivel = 3;
        let rows = flatten(&forest);
        assert_eq!(rows.last().unwrap().nivel, 3);
        assert_eq!(
            check_levels(&forest),
            Err(LevelMismatch { codigo: "2".into(), nivel: 3, expected: 1 })
        );
    }

    #[test]
    fn indentation_grows_per_level() {
        assert_eq!(indent_px(1), 0);
        assert_eq!(indent_px(3), 40);
        assert_eq!(indent_px(0), 0);
        assert_eq!(indent_px(u32::MAX), u32::MAX);
    }

    #[test]
    fn empty_and_unknown_tipo() {
        assert!(flatten(&[]).is_empty());
        let cuenta: CuentaContable = serde_json::from_value(json!({
            "id": 9, "codigo": "9", "nombre": "Orden", "tipo": "cuentas_de_orden", "nivel": 1
        }))
        .unwrap();
        assert_eq!(cuenta.tipo, TipoCuenta::Otro);
    }

    fn cuenta(i: i64) -> CuentaContable {
        CuentaContable {
            id: RecordId(i),
            codigo: format!("1.{:02}", i),
            nombre: format!("Cuenta {}", i),
            tipo: TipoCuenta::Activo,
            imputable: true,
            nivel: 2,
            padre_id: Some(RecordId(0)),
            children: Vec::new(),
        }
    }

    #[test]
    fn twenty_three_accounts_page_by_ten() {
        let forest = vec![CuentaContable {
            id: RecordId(0),
            codigo: "1".into(),
            nombre: "Activo".into(),
            tipo: TipoCuenta::Activo,
            imputable: false,
            nivel: 1,
            padre_id: None,
            children: (1..=22).map(cuenta).collect(),
        }];
        let rows = flatten(&forest);
        assert_eq!(rows.len(), 23);

        let mut ctrl = ListController::new(10, 2);
        let ticket = ctrl.begin_load();
        ctrl.finish_load(ticket, rows);

        let expected = [(10, "1–10 de 23"), (10, "11–20 de 23"), (3, "21–23 de 23")];
        for (page, (count, label)) in expected.iter().enumerate() {
            ctrl.dispatch(ListAction::GoToPage(page + 1));
            let view = ctrl.view();
            assert_eq!(view.rows.len(), *count);
            assert_eq!(view.range.to_string(), *label);
            assert_eq!(view.total_pages, 3);
        }
    }

    #[test]
    fn imputable_filter_on_rows() {
        let mut ctrl = ListController::new(50, 2);
        let ticket = ctrl.begin_load();
        ctrl.finish_load(ticket, flatten(&plan()));
        ctrl.dispatch(ListAction::SetEnum { name: "imputable".into(), value: "true".into() });
        let names: Vec<String> = ctrl.view().rows.into_iter().map(|r| r.nombre).collect();
        assert_eq!(names, vec!["Caja", "Banco Nación"]);
    }
}
