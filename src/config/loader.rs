//! Data loading functionality.
//!
//! This module provides the [`DataLoader`] type for loading the rota
//! viewer's configuration and data files from a directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::calculation::{RotaBounds, rota_bounds};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BlockPlacement, BlockTimetable, Registrar, RegistrarBlocks, Rota, RotaEntry,
    parse_block_timetables,
};

use super::types::ViewerConfig;

/// Loads and provides access to the rota viewer's data.
///
/// All files are read once; the loaded data is immutable afterwards.
///
/// # Directory Structure
///
/// ```text
/// data/radiology/
/// ├── viewer.yaml           # Department name, file names, navigation window
/// ├── registrars_data.json  # Registrars, allowances, leave records
/// ├── rota.json             # Duty rota, structured or flat rows
/// ├── reg_blocks.json       # Block placements per registrar
/// └── blocks.json           # Weekly timetable per block
/// ```
///
/// # Example
///
/// ```no_run
/// use rota_engine::config::DataLoader;
///
/// let loader = DataLoader::load("./data/radiology")?;
/// let registrar = loader.registrar("Dr Alice Morgan")?;
/// println!("Annual allowance: {}", registrar.allowance().annual);
/// # Ok::<(), rota_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    config: ViewerConfig,
    registrars: Vec<Registrar>,
    rota: Rota,
    registrar_blocks: BTreeMap<String, RegistrarBlocks>,
    timetables: Vec<BlockTimetable>,
}

impl DataLoader {
    /// Loads configuration and data from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `DataLoader` on success, or an error if:
    /// - `viewer.yaml` or any data file it names is missing
    /// - Any file cannot be parsed
    /// - A rota entry has an unreadable date or session
    /// - A block placement names an unknown month
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config: ViewerConfig = Self::load_yaml(&path.join("viewer.yaml"))?;

        let registrars: Vec<Registrar> = Self::load_json(&path.join(&config.files.registrars))?;

        let rota_path = path.join(&config.files.rota);
        let entries: Vec<RotaEntry> = Self::load_json(&rota_path)?;
        let rota = Rota::from_entries(entries)?;

        let blocks_path = path.join(&config.files.registrar_blocks);
        let registrar_blocks: BTreeMap<String, RegistrarBlocks> = Self::load_json(&blocks_path)?;
        for placements in registrar_blocks.values() {
            Self::validate_placements(&placements.blocks)?;
        }

        let timetable_path = path.join(&config.files.blocks);
        let value: serde_json::Value = Self::load_json(&timetable_path)?;
        let timetables =
            parse_block_timetables(value).map_err(|e| EngineError::DataParseError {
                path: timetable_path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(
            department = %config.department,
            registrars = registrars.len(),
            rota_days = rota.days().len(),
            timetables = timetables.len(),
            "Loaded rota data"
        );

        Ok(Self {
            config,
            registrars,
            rota,
            registrar_blocks,
            timetables,
        })
    }

    fn read(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::DataNotFound {
            path: path.display().to_string(),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = Self::read(path)?;
        serde_yaml::from_str(&content).map_err(|e| EngineError::DataParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Loads and parses a JSON file.
    fn load_json<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = Self::read(path)?;
        serde_json::from_str(&content).map_err(|e| EngineError::DataParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn validate_placements(placements: &[BlockPlacement]) -> EngineResult<()> {
        for placement in placements {
            placement.date_range()?;
        }
        Ok(())
    }

    /// Returns the viewer configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Returns all registrars in file order.
    pub fn registrars(&self) -> &[Registrar] {
        &self.registrars
    }

    /// Gets a registrar by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RegistrarNotFound`] if no registrar has that name.
    pub fn registrar(&self, name: &str) -> EngineResult<&Registrar> {
        self.registrars
            .iter()
            .find(|registrar| registrar.name == name)
            .ok_or_else(|| EngineError::RegistrarNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the normalized rota.
    pub fn rota(&self) -> &Rota {
        &self.rota
    }

    /// Navigation bounds of the weekly rota view.
    pub fn rota_bounds(&self) -> Option<RotaBounds> {
        rota_bounds(&self.rota, self.config.navigation_window_days)
    }

    /// Block placements for every registrar, keyed by name.
    pub fn registrar_blocks(&self) -> &BTreeMap<String, RegistrarBlocks> {
        &self.registrar_blocks
    }

    /// Block placements for one registrar; empty if they have none.
    pub fn blocks_for(&self, name: &str) -> &[BlockPlacement] {
        self.registrar_blocks
            .get(name)
            .map(|placements| placements.blocks.as_slice())
            .unwrap_or(&[])
    }

    /// Returns all block timetables in file order.
    pub fn timetables(&self) -> &[BlockTimetable] {
        &self.timetables
    }

    /// Gets a block timetable by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BlockNotFound`] if no block has that name.
    pub fn timetable(&self, name: &str) -> EngineResult<&BlockTimetable> {
        self.timetables
            .iter()
            .find(|timetable| timetable.name == name)
            .ok_or_else(|| EngineError::BlockNotFound {
                name: name.to_string(),
            })
    }
}
