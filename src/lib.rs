//! Archscan - Architecture and risk analysis for JS/TS projects
//!
//! Builds a file-level import dependency graph, classifies declared
//! packages against observed imports, scans for dangerous code patterns
//! and committed secrets, and folds everything into a composite health
//! score.

pub mod cli;
pub mod config;
pub mod deps;
pub mod files;
pub mod githist;
pub mod graph;
pub mod imports;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
pub mod security;
