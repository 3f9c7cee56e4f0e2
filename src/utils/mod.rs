//! Utility functions and types

mod parallel;
pub mod data_loader;

pub use parallel::{try_parallel_map, ParallelConfig};
pub use data_loader::{load_auto, save_csv};
