//! Core modules: configuration, the two migration phases, and reporting.

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod migration;
pub mod output;
pub mod report;
pub mod runner;
pub mod sessions;
pub mod tui;
