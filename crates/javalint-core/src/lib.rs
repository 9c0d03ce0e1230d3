//! # javalint-core
//!
//! Language-neutral building blocks shared by the javalint crates.
//!
//! This crate provides:
//!
//! - [`Violation`] for representing lint findings
//! - [`LintResult`] for collecting findings across a run
//! - [`Config`] for TOML-based analyzer, suppression, and rule settings
//! - [`utils`] for allow directives and qualified-name handling
//!
//! Parsing and the rule pipeline live in `javalint-java`; this crate knows
//! nothing about Java syntax.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use config::{
    AnalyzerConfig, Config, ConfigError, ExternalTypeConfig, RuleConfig, SuppressionConfig,
};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
