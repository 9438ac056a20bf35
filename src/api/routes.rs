//! API Routes
//!
//! HTTP endpoint definitions. Routes only extract input, run validation and
//! hand the resulting command to a handler; the envelope does the rest.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::OperationContext;
use crate::error::{AppError, AppResult};
use crate::event_store::{EventPage, EventStore};
use crate::handlers::{
    CreateEventHandler, DeleteEventCommand, DeleteEventHandler, EventQueryHandler, RequestedId,
    UpdateEventHandler,
};
use crate::validation::{self, ListEventsParams, LookupParams};

use super::envelope::{ApiResponse, EventData, EventsData};

// =========================================================================
// State
// =========================================================================

/// Shared state handed to every route
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: EventStore,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Seconds since the state was built
    pub uptime: f64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the router for `/api/events`
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/all", get(list_all_events))
        .route("/query", get(find_event))
        .route("/:id", put(update_event).delete(delete_event))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// Context set by the request middleware, or a fresh one when the router
/// runs without it
fn operation_context(context: Option<Extension<OperationContext>>) -> OperationContext {
    context.map(|Extension(context)| context).unwrap_or_default()
}

/// A body without a JSON content type, or an empty one, reads as an empty
/// object; a JSON body that does not parse is rejected.
fn read_body(headers: &HeaderMap, payload: Result<Bytes, BytesRejection>) -> AppResult<Value> {
    let bytes = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
    if !has_json_content_type(headers) || bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    Json::<Value>::from_bytes(&bytes)
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))
}

/// `application/json` or any `application/*+json`, parameters ignored
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(essence) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };

    let essence = essence.trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// A query string that does not deserialize (a repeated key, for one) is a
/// bad request like any other
fn read_query<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::MalformedQuery(rejection.body_text()))
}

// =========================================================================
// GET /api/events/all
// =========================================================================

async fn list_all_events(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
) -> ApiResponse<EventsData> {
    let context = operation_context(context);
    let events = EventQueryHandler::new(state.store).list_all(&context).await;
    ApiResponse::ok("All events retrieved successfully!", events.into())
}

// =========================================================================
// GET /api/events?tipo=&mes=&page=&limit=
// =========================================================================

async fn list_events(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    query: Result<Query<ListEventsParams>, QueryRejection>,
) -> AppResult<ApiResponse<EventPage>> {
    let context = operation_context(context);
    let params = read_query(query)?;
    let query = validation::validate_list_query(&params).map_err(|errors| {
        tracing::info!(
            correlation_id = %context.correlation_id,
            %errors,
            "Validation errors (GET /api/events)"
        );
        errors
    })?;

    let page = EventQueryHandler::new(state.store).list(query, &context).await;
    Ok(ApiResponse::ok("Events retrieved successfully!", page))
}

// =========================================================================
// GET /api/events/query?id=
// =========================================================================

async fn find_event(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    query: Result<Query<LookupParams>, QueryRejection>,
) -> AppResult<ApiResponse<EventData>> {
    let context = operation_context(context);
    let params = read_query(query)?;
    let target = validation::validate_lookup(&params)?;

    let event = EventQueryHandler::new(state.store).find(target, &context).await?;
    Ok(ApiResponse::ok("Event found!", event.into()))
}

// =========================================================================
// POST /api/events
// =========================================================================

async fn create_event(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    headers: HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> AppResult<ApiResponse<EventData>> {
    let context = operation_context(context);
    let body = read_body(&headers, payload)?;
    let command = validation::validate_create(&body).map_err(|errors| {
        tracing::info!(
            correlation_id = %context.correlation_id,
            %errors,
            "Validation errors (POST /api/events)"
        );
        errors
    })?;

    let event = CreateEventHandler::new(state.store).execute(command, &context).await;
    Ok(ApiResponse::created("Event created successfully!", event.into()))
}

// =========================================================================
// PUT /api/events/:id
// =========================================================================

async fn update_event(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> AppResult<ApiResponse<EventData>> {
    let context = operation_context(context);
    let body = read_body(&headers, payload)?;
    let command = validation::validate_update(&id, &body).map_err(|errors| {
        tracing::info!(
            correlation_id = %context.correlation_id,
            %errors,
            "Validation errors (PUT /api/events/:id)"
        );
        errors
    })?;

    let event = UpdateEventHandler::new(state.store).execute(command, &context).await?;
    Ok(ApiResponse::ok("Event updated successfully!", event.into()))
}

// =========================================================================
// DELETE /api/events/:id
// =========================================================================

async fn delete_event(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EventData>> {
    let context = operation_context(context);
    let command = DeleteEventCommand::new(RequestedId::new(id));

    let event = DeleteEventHandler::new(state.store).execute(command, &context).await?;
    Ok(ApiResponse::ok("Event deleted successfully!", event.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_deserialize() {
        let params: ListEventsParams =
            serde_json::from_str(r#"{ "tipo": "ingreso", "page": "2" }"#).unwrap();
        assert_eq!(params.tipo.as_deref(), Some("ingreso"));
        assert_eq!(params.page.as_deref(), Some("2"));
        assert!(params.mes.is_none());
        assert!(params.limit.is_none());
    }

    #[test]
    fn test_lookup_params_default() {
        let params: LookupParams = serde_json::from_str("{}").unwrap();
        assert!(params.id.is_none());
    }

    #[test]
    fn test_operation_context_fallback() {
        let supplied = OperationContext::new();
        let kept = operation_context(Some(Extension(supplied.clone())));
        assert_eq!(kept.correlation_id, supplied.correlation_id);

        let fresh = operation_context(None);
        assert_ne!(fresh.correlation_id, supplied.correlation_id);
    }

    fn json_headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type.parse().unwrap());
        headers
    }

    #[test]
    fn test_read_body_passes_json_through() {
        let headers = json_headers("application/json");
        let body = read_body(&headers, Ok(Bytes::from_static(br#"{ "nombre": "x" }"#))).unwrap();
        assert_eq!(body["nombre"], "x");
    }

    #[test]
    fn test_read_body_empty_or_untyped_is_empty_object() {
        let empty = read_body(&json_headers("application/json"), Ok(Bytes::new())).unwrap();
        assert_eq!(empty, serde_json::json!({}));

        let untyped = read_body(&HeaderMap::new(), Ok(Bytes::from_static(b"nombre=x"))).unwrap();
        assert_eq!(untyped, serde_json::json!({}));
    }

    #[test]
    fn test_read_body_rejects_broken_json() {
        let headers = json_headers("application/json; charset=utf-8");
        let result = read_body(&headers, Ok(Bytes::from_static(b"{ nombre")));
        assert!(matches!(result, Err(AppError::MalformedBody(_))));
    }

    #[test]
    fn test_json_content_type_variants() {
        assert!(has_json_content_type(&json_headers("application/json")));
        assert!(has_json_content_type(&json_headers("Application/JSON; charset=utf-8")));
        assert!(has_json_content_type(&json_headers("application/merge-patch+json")));
        assert!(!has_json_content_type(&json_headers("text/plain")));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_read_query_maps_rejection() {
        let uri: axum::http::Uri = "/api/events?tipo=ingreso&tipo=egreso".parse().unwrap();
        let result = read_query(Query::<ListEventsParams>::try_from_uri(&uri));
        assert!(matches!(result, Err(AppError::MalformedQuery(_))));
    }
}
