use contracts::domain::a007_ejercicio::aggregate::Ejercicio;
use contracts::projections::p900_balance::dto::{BalanceQuery, BalanceReport};
use contracts::shared::error::ApiError;

use crate::shared::api_client;
use crate::shared::api_utils::open_in_new_window;

/// Ejercicios for the query selector
pub async fn fetch_ejercicios() -> Result<Vec<Ejercicio>, ApiError> {
    api_client::fetch_list::<Ejercicio>().await
}

pub async fn fetch_balance(query: &BalanceQuery) -> Result<BalanceReport, ApiError> {
    let (body, http_ok) = api_client::get_text(&query.report_path()?).await?;
    BalanceReport::parse_response(&body, http_ok)
}

/// The spreadsheet is a browser download, not a fetch.
pub fn export_excel(query: &BalanceQuery) -> Result<(), ApiError> {
    open_in_new_window(&query.export_path()?);
    Ok(())
}
