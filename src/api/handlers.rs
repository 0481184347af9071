//! HTTP request handlers for the rota engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CycleReport, build_cycle_report, build_daily_schedule, build_leave_report, build_rota_week,
    cycle_for_date, sorted_blocks, who_on_leave,
};
use crate::config::DataLoader;
use crate::error::EngineResult;

use super::request::DateQuery;
use super::response::{
    ApiErrorResponse, OnLeaveResponse, RegistrarBlocksResponse, RegistrarSummary,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/registrars", get(list_registrars_handler))
        .route("/registrars/:name/leave", get(leave_report_handler))
        .route("/registrars/:name/leave/cycle", get(cycle_report_handler))
        .route("/registrars/:name/blocks", get(registrar_blocks_handler))
        .route("/leave/on", get(on_leave_handler))
        .route("/rota/week", get(rota_week_handler))
        .route("/schedule/daily", get(daily_schedule_handler))
        .route("/blocks", get(list_blocks_handler))
        .route("/blocks/:name", get(block_handler))
        .route("/cycles", get(cycle_handler))
        .with_state(state)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Turns a handler result into a JSON response, logging the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    endpoint: &str,
    started: Instant,
    result: EngineResult<T>,
) -> Response {
    let duration_us = started.elapsed().as_micros();

    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                endpoint,
                duration_us,
                "Request completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint,
                error = %err,
                duration_us,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn begin(endpoint: &str) -> (Uuid, Instant) {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, endpoint, "Processing request");
    (correlation_id, Instant::now())
}

/// Handler for GET /registrars.
async fn list_registrars_handler(State(state): State<AppState>) -> Response {
    let (correlation_id, started) = begin("/registrars");

    let registrars: Vec<RegistrarSummary> = state
        .data()
        .registrars()
        .iter()
        .map(|registrar| RegistrarSummary {
            name: registrar.name.clone(),
            allowance: registrar.allowance(),
            leave_records: registrar.leave_records.len(),
        })
        .collect();

    respond(correlation_id, "/registrars", started, Ok(registrars))
}

/// Handler for GET /registrars/:name/leave.
///
/// Returns the registrar's full leave report. Unreadable leave records are
/// reported in the body's `warnings` rather than failing the request.
async fn leave_report_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let (correlation_id, started) = begin("/registrars/:name/leave");

    let result = state.data().registrar(&name).and_then(build_leave_report).map(|report| {
        if !report.warnings.is_empty() {
            warn!(
                correlation_id = %correlation_id,
                registrar = %name,
                warnings = report.warnings.len(),
                "Skipped unreadable leave records"
            );
        }
        report
    });

    respond(correlation_id, "/registrars/:name/leave", started, result)
}

/// Handler for GET /registrars/:name/leave/cycle?date=.
async fn cycle_report_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DateQuery>,
) -> Response {
    let (correlation_id, started) = begin("/registrars/:name/leave/cycle");

    let result = cycle_report(state.data(), &name, &query);

    respond(correlation_id, "/registrars/:name/leave/cycle", started, result)
}

fn cycle_report(data: &DataLoader, name: &str, query: &DateQuery) -> EngineResult<CycleReport> {
    let date = query.resolve(today())?;
    let registrar = data.registrar(name)?;
    build_cycle_report(registrar, date)
}

/// A name present in the block placements file is accepted even when it is
/// missing from the registrar file.
fn registrar_blocks(data: &DataLoader, name: String) -> EngineResult<RegistrarBlocksResponse> {
    if !data.registrar_blocks().contains_key(&name) {
        data.registrar(&name)?;
    }
    Ok(RegistrarBlocksResponse {
        blocks: sorted_blocks(data.blocks_for(&name))?,
        registrar: name,
    })
}

/// Handler for GET /registrars/:name/blocks.
async fn registrar_blocks_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let (correlation_id, started) = begin("/registrars/:name/blocks");
    let result = registrar_blocks(state.data(), name);

    respond(correlation_id, "/registrars/:name/blocks", started, result)
}

/// Handler for GET /leave/on?date=.
async fn on_leave_handler(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Response {
    let (correlation_id, started) = begin("/leave/on");

    let result = query.resolve(today()).map(|date| OnLeaveResponse {
        date,
        registrars: who_on_leave(state.data().registrars(), date),
    });

    respond(correlation_id, "/leave/on", started, result)
}

/// Handler for GET /rota/week?date=.
async fn rota_week_handler(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Response {
    let (correlation_id, started) = begin("/rota/week");
    let data = state.data();
    let today = today();

    let result = query.resolve(today).map(|date| {
        build_rota_week(
            data.rota(),
            data.registrars(),
            date,
            today,
            data.rota_bounds(),
            data.config().navigation_window_days,
        )
    });

    respond(correlation_id, "/rota/week", started, result)
}

/// Handler for GET /schedule/daily?date=.
async fn daily_schedule_handler(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Response {
    let (correlation_id, started) = begin("/schedule/daily");
    let data = state.data();

    let result = query.resolve(today()).and_then(|date| {
        build_daily_schedule(data.registrars(), data.rota(), data.registrar_blocks(), date)
    });

    respond(correlation_id, "/schedule/daily", started, result)
}

/// Handler for GET /blocks.
async fn list_blocks_handler(State(state): State<AppState>) -> Response {
    let (correlation_id, started) = begin("/blocks");
    let timetables = state.data().timetables().to_vec();
    respond(correlation_id, "/blocks", started, Ok(timetables))
}

/// Handler for GET /blocks/:name.
async fn block_handler(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let (correlation_id, started) = begin("/blocks/:name");
    let result = state.data().timetable(&name).cloned();
    respond(correlation_id, "/blocks/:name", started, result)
}

/// Handler for GET /cycles?date=.
async fn cycle_handler(Query(query): Query<DateQuery>) -> Response {
    let (correlation_id, started) = begin("/cycles");
    let result = query.resolve(today()).and_then(cycle_for_date);
    respond(correlation_id, "/cycles", started, result)
}
