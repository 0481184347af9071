//! Application state for the rota engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::DataLoader;

/// Shared application state.
///
/// Holds the loaded rota data, shared read-only across all request
/// handlers.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rota data.
    data: Arc<DataLoader>,
}

impl AppState {
    /// Creates a new application state from loaded data.
    pub fn new(data: DataLoader) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Returns a reference to the loaded data.
    pub fn data(&self) -> &DataLoader {
        &self.data
    }
}
