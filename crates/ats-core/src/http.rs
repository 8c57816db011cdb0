//! Response envelope and lenient parameter parsing shared by the routers.

use std::convert::Infallible;
use std::str::FromStr;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::store::StoreError;

/// `{success, message, data}` on success, `{success, message, error}` on failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn ok<T: Serialize>(message: &str, data: T) -> Response {
    let body = ApiResponse {
        success: true,
        message: message.to_string(),
        data: Some(data),
        error: None,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub fn failure(status: StatusCode, message: &str, error: String) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: false,
        message: message.to_string(),
        data: None,
        error: Some(error),
    };
    (status, axum::Json(body)).into_response()
}

pub fn store_failure(message: &str, error: &StoreError) -> Response {
    let status = match error {
        StoreError::MissingReference { .. } => StatusCode::NOT_FOUND,
        StoreError::Conflict { .. } | StoreError::Unavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    failure(status, message, error.to_string())
}

/// Query string extractor that never rejects. Repeated keys keep their first
/// value and an undecodable query yields `T::default()`.
#[derive(Debug, Default)]
pub struct LenientQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for LenientQuery<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(first_values(&parts.uri)))
    }
}

fn first_values<T: DeserializeOwned + Default>(uri: &Uri) -> T {
    let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(uri) else {
        return T::default();
    };

    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }
    serde_json::from_value(Value::Object(fields)).unwrap_or_default()
}

/// Parses a query value, treating blank or malformed input as absent.
pub fn lenient<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

/// Keeps a caller supplied limit within `1..=max`, falling back to `default`.
pub fn clamp_limit(raw: Option<&str>, default: usize, max: usize) -> usize {
    let max = max.max(1);
    lenient::<usize>(raw).unwrap_or(default).clamp(1, max)
}

pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
