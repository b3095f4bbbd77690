//! UIDAI Store - Dataset loader ports and adapters
//!
//! This crate defines the dataset source port and provides a CSV adapter for the
//! cleaning stage's output files plus an in-memory adapter for tests and demos.

pub mod csv_source;
pub mod memory;
pub mod ports;

pub use csv_source::CsvDatasetSource;
pub use memory::MemoryDatasetSource;
pub use ports::{load_context, DatasetSource};
