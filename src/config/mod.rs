//! Configuration and data loading for the rota viewer.
//!
//! This module loads `viewer.yaml` and the JSON data files it names:
//! registrars with their leave, the duty rota, block placements and block
//! timetables.
//!
//! # Example
//!
//! ```no_run
//! use rota_engine::config::DataLoader;
//!
//! let loader = DataLoader::load("./data/radiology").unwrap();
//! println!("Loaded department: {}", loader.config().department);
//! ```

mod loader;
mod types;

pub use loader::DataLoader;
pub use types::{DataFiles, ViewerConfig};
