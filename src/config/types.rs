//! Configuration types for the rota viewer.
//!
//! This module contains the strongly-typed structure deserialized from
//! `viewer.yaml`.

use serde::Deserialize;

use crate::calculation::DEFAULT_WINDOW_DAYS;

fn default_registrars_file() -> String {
    "registrars_data.json".to_string()
}

fn default_rota_file() -> String {
    "rota.json".to_string()
}

fn default_registrar_blocks_file() -> String {
    "reg_blocks.json".to_string()
}

fn default_blocks_file() -> String {
    "blocks.json".to_string()
}

fn default_window_days() -> u64 {
    DEFAULT_WINDOW_DAYS
}

/// Names of the data files, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataFiles {
    /// Registrars with their allowances and leave records.
    #[serde(default = "default_registrars_file")]
    pub registrars: String,
    /// The duty rota.
    #[serde(default = "default_rota_file")]
    pub rota: String,
    /// Block placements per registrar.
    #[serde(default = "default_registrar_blocks_file")]
    pub registrar_blocks: String,
    /// Weekly timetable per block.
    #[serde(default = "default_blocks_file")]
    pub blocks: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            registrars: default_registrars_file(),
            rota: default_rota_file(),
            registrar_blocks: default_registrar_blocks_file(),
            blocks: default_blocks_file(),
        }
    }
}

/// The viewer configuration file structure.
///
/// ```yaml
/// department: Radiology
/// files:
///   registrars: registrars_data.json
///   rota: rota.json
/// navigation_window_days: 14
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewerConfig {
    /// The department the rota belongs to.
    pub department: String,
    /// Data file names; any omitted name takes its default.
    #[serde(default)]
    pub files: DataFiles,
    /// How far past the last rota week the weekly view may navigate.
    #[serde(default = "default_window_days")]
    pub navigation_window_days: u64,
}
