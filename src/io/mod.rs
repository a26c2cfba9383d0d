//! Instance-file loading.

pub mod solomon;

pub use solomon::{parse_instance, read_instance, DataFormatError};
