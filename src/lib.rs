pub mod aggregate;
pub mod config;
pub mod dates;
pub mod diagnostics;
pub mod extract_error;
pub mod importers;
pub mod models;
pub mod services;
pub mod utils;
