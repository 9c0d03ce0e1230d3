//! # javalint-java
//!
//! Tree-sitter based Java front end and declaration-level rule pipeline.
//!
//! This crate turns Java source into an immutable compilation-unit model and
//! provides the services rules are built from:
//!
//! - [`JavaExtractor`] for parsing files into [`CompilationUnit`]s
//! - [`SymbolIndex`] and [`Resolver`] for direct supertype resolution
//! - [`annotations`] for matching annotations by qualified identity
//! - [`GeneratedCodeDetector`] and [`PlatformVersion`] for generated-code
//!   exclusion
//! - [`SuppressionPolicy`] for `@SuppressWarnings` and allow comments
//! - [`Rule`] and [`Analyzer`] for running rules over a source tree
//!
//! ## Example
//!
//! ```ignore
//! use javalint_java::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src/main/java")
//!     .rule(MyRule)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod annotations;
mod context;
mod generated;
mod java;
pub mod model;
pub mod names;
pub mod platform;
mod resolve;
mod rule;
mod suppression;
mod symbols;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use context::AnalysisContext;
pub use generated::GeneratedCodeDetector;
pub use java::{ExtractError, JavaExtractor};
pub use model::{CompilationUnit, DeclId, DeclKind, TypeDeclaration};
pub use names::{ImportScope, TypeName};
pub use platform::PlatformVersion;
pub use resolve::{Resolution, Resolver};
pub use rule::{Rule, RuleBox};
pub use suppression::{SuppressionPolicy, SuppressionSet};
pub use symbols::{Symbol, SymbolIndex, SymbolOrigin};
