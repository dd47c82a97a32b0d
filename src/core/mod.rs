//! Core data types and I/O operations.

pub mod loaders;
pub mod scanner;

pub use loaders::{load_light_curve, LightCurve, LoaderError};
pub use scanner::{find_name_collisions, output_path_for, scan_input_dir, ScanError};
