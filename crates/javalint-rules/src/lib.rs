//! # javalint-rules
//!
//! Built-in lint rules for javalint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | JL001 | `ExtendsAutoValue` | Forbids extending `@AutoValue` / `@AutoOneOf` classes |
//!
//! ## Usage
//!
//! ```ignore
//! use javalint_java::Analyzer;
//! use javalint_rules::ExtendsAutoValue;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src/main/java")
//!     .rule(ExtendsAutoValue::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extends_auto_value;
mod registry;

pub use extends_auto_value::{ExtendsAutoValue, Outcome};
pub use registry::{all_rules, rule_by_name};

/// Re-export core types for convenience.
pub use javalint_core::{Severity, Violation};
pub use javalint_java::Rule;
