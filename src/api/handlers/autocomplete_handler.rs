use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, error};

use crate::{
    api::{app_state::AppState, dto::AutocompleteParams},
    error::{AutocompleteError, InvalidQuery},
    search::{AutocompleteRequest, SearchResult},
};

/// 自动补全
///
/// 总是返回 200。无匹配、查询无效以及任何内部错误都返回 `[]`，
/// 调用方无法也不需要区分这些情况。
pub async fn autocomplete(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<Vec<SearchResult>> {
    let start = Instant::now();

    let request = match params {
        Ok(Query(pairs)) => AutocompleteRequest::from(AutocompleteParams::from_pairs(pairs)),
        Err(rejection) => {
            let err = AutocompleteError::from(InvalidQuery::MalformedParameters(
                rejection.body_text(),
            ));
            return respond(&state, None, Err(err), start);
        }
    };

    let outcome = AssertUnwindSafe(state.autocomplete_service.complete(&request))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AutocompleteError::Unexpected(panic_message(panic.as_ref()))));

    respond(&state, request.term.as_deref(), outcome, start)
}

fn respond(
    state: &AppState,
    term: Option<&str>,
    outcome: Result<Vec<SearchResult>, AutocompleteError>,
    start: Instant,
) -> Json<Vec<SearchResult>> {
    let took_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(results) => {
            debug!(term = ?term, results = results.len(), took_ms, "Autocomplete served");
            state.metrics.record_autocomplete(took_ms, results.len());
            Json(results)
        }
        Err(e) => {
            match &e {
                AutocompleteError::InvalidQuery(_) | AutocompleteError::NoMatches => {
                    debug!(term = ?term, kind = e.kind(), "Autocomplete returned no results: {}", e);
                }
                _ => {
                    error!(term = ?term, kind = e.kind(), "Autocomplete failed: {}", e);
                }
            }
            state.metrics.record_autocomplete(took_ms, 0);
            state.metrics.record_empty_outcome(e.kind());
            Json(Vec::new())
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
