//! HTTP API module for the rota engine.
//!
//! This module provides read-only REST endpoints over the loaded rota data:
//! registrar leave reports, leave cycles, who is on leave, the weekly rota,
//! the daily schedule and training blocks.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::DateQuery;
pub use response::{
    ApiError, ApiErrorResponse, OnLeaveResponse, RegistrarBlocksResponse, RegistrarSummary,
};
pub use state::AppState;
