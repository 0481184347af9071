//! Leave accounting and rota engine for a radiology registrar rota.
//!
//! This crate reads registrar, rota and training block data, splits leave
//! records across August-to-August leave cycles, summarizes leave used
//! against each registrar's allowance, and builds the weekly rota and daily
//! schedule views served over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
