//! HTTP calls for resource pages.
//!
//! Every request carries the session cookie and the CSRF header. Every answer
//! goes through [`Envelope`] together with its HTTP status, so callers only
//! deal with [`ApiError`].

use contracts::domain::common::resource::{delete_path, detail_path, list_path, save_path};
use contracts::domain::common::{BodyEncoding, RecordId, Resource};
use contracts::shared::api_response::Envelope;
use contracts::shared::error::ApiError;
use contracts::shared::form::{form_body, json_body, SubmitRequest};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;
use web_sys::RequestCredentials;

use crate::shared::api_utils::{api_url, csrf_token};
use crate::shared::config::config;

fn with_session(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json");
    match csrf_token() {
        Some(token) => builder.header(&config().api.csrf_header, &token),
        None => builder,
    }
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Body text plus whether the status was 2xx.
async fn read_body(response: Response) -> Result<(String, bool), ApiError> {
    let http_ok = response.ok();
    if !http_ok {
        log::warn!("{} answered {}", response.url(), response.status());
    }
    let body = response.text().await.map_err(network)?;
    Ok((body, http_ok))
}

/// GET `path` and return the raw body with its status flag.
pub async fn get_text(path: &str) -> Result<(String, bool), ApiError> {
    let response = with_session(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(network)?;
    read_body(response).await
}

pub async fn get_envelope(path: &str, collection_key: Option<&str>) -> Result<Envelope, ApiError> {
    let (body, http_ok) = get_text(path).await?;
    Envelope::parse_response(&body, collection_key, http_ok).into_result()
}

/// Whole collection of a resource; filtering and paging happen client-side.
pub async fn fetch_list<R: Resource>() -> Result<Vec<R>, ApiError> {
    let (body, http_ok) = get_text(&list_path::<R>()).await?;
    Envelope::parse_response(&body, Some(R::COLLECTION_KEY), http_ok).records()
}

/// Detail as loose JSON; the form reads only the fields it knows.
pub async fn fetch_detail<R: Resource>(id: RecordId) -> Result<Value, ApiError> {
    let envelope = get_envelope(&detail_path::<R>(id), None).await?;
    Ok(envelope.data)
}

/// Sends the form to the resource's save endpoint. Returns the id the backend reports.
pub async fn save<R: Resource>(request: &SubmitRequest) -> Result<Option<RecordId>, ApiError> {
    let url = api_url(&save_path::<R>(request.id));
    let builder = with_session(Request::post(&url));
    let prepared = match R::BODY {
        BodyEncoding::Json => builder.json(&json_body(R::form_fields(), &request.values, request.id)),
        BodyEncoding::Form => builder
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form_body(&request.values, request.id)?),
    }
    .map_err(|e| ApiError::Decode(e.to_string()))?;

    let response = prepared.send().await.map_err(network)?;
    let (body, http_ok) = read_body(response).await?;
    let envelope = Envelope::parse_response(&body, None, http_ok).into_result()?;
    Ok(envelope.id)
}

pub async fn delete<R: Resource>(id: RecordId) -> Result<(), ApiError> {
    let response = with_session(Request::post(&api_url(&delete_path::<R>(id))))
        .send()
        .await
        .map_err(network)?;
    let (body, http_ok) = read_body(response).await?;
    Envelope::parse_response(&body, None, http_ok).into_result().map(|_| ())
}
