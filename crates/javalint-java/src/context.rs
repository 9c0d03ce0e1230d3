//! Read-only context handed to rules.

use javalint_core::Location;

use crate::generated::GeneratedCodeDetector;
use crate::model::{CompilationUnit, TypeDeclaration};
use crate::platform::PlatformVersion;
use crate::resolve::{Resolution, Resolver};
use crate::suppression::{SuppressionPolicy, SuppressionSet};
use crate::symbols::SymbolIndex;

/// Everything a rule may consult while checking one compilation unit.
///
/// Cheap to copy; all fields are shared references.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    unit: &'a CompilationUnit,
    source: &'a str,
    index: &'a SymbolIndex,
    platform: PlatformVersion,
    suppression: &'a SuppressionPolicy,
}

impl<'a> AnalysisContext<'a> {
    /// Creates a context for one unit.
    #[must_use]
    pub fn new(
        unit: &'a CompilationUnit,
        source: &'a str,
        index: &'a SymbolIndex,
        platform: PlatformVersion,
        suppression: &'a SuppressionPolicy,
    ) -> Self {
        Self {
            unit,
            source,
            index,
            platform,
            suppression,
        }
    }

    /// Unit being checked.
    #[must_use]
    pub fn unit(&self) -> &'a CompilationUnit {
        self.unit
    }

    /// Source text of the unit.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Project-wide symbols.
    #[must_use]
    pub fn index(&self) -> &'a SymbolIndex {
        self.index
    }

    /// Resolves the direct supertype of a declaration in this unit.
    #[must_use]
    pub fn resolve_supertype(&self, decl: &TypeDeclaration) -> Resolution {
        Resolver::new(self.index).resolve_supertype(self.unit, decl)
    }

    /// Active host platform version.
    #[must_use]
    pub fn platform_version(&self) -> PlatformVersion {
        self.platform
    }

    /// Generated-code detector for the active platform.
    #[must_use]
    pub fn generated_code(&self) -> GeneratedCodeDetector {
        GeneratedCodeDetector::for_platform(self.platform)
    }

    /// Identifiers suppressed for a declaration.
    #[must_use]
    pub fn suppression_set(&self, decl: &TypeDeclaration) -> SuppressionSet {
        self.suppression
            .suppression_set(self.unit, decl.id, self.source)
    }

    /// Whether any of `rule_names` is suppressed for a declaration.
    #[must_use]
    pub fn is_suppressed(&self, decl: &TypeDeclaration, rule_names: &[&str]) -> bool {
        self.suppression
            .is_suppressed(self.unit, decl.id, self.source, rule_names)
    }

    /// Location of a declaration header.
    #[must_use]
    pub fn location(&self, decl: &TypeDeclaration) -> Location {
        Location::new(
            self.unit.file_path().to_path_buf(),
            decl.span.line,
            decl.span.column,
        )
        .with_span(decl.span.offset, decl.span.length)
    }
}
