//! CLI command definitions and handlers

pub mod import;
