//! Generated-code detection.

use crate::annotations::{declaration_has_annotation, has_annotation};
use crate::model::{CompilationUnit, DeclId};
use crate::platform::PlatformVersion;
use crate::symbols::Symbol;

/// Recognises code marked as produced by tooling.
#[derive(Debug, Clone, Copy)]
pub struct GeneratedCodeDetector {
    identities: &'static [&'static str],
}

impl GeneratedCodeDetector {
    /// Detector using the generated-code identities of `platform`.
    #[must_use]
    pub fn for_platform(platform: PlatformVersion) -> Self {
        Self {
            identities: platform.generated_annotations(),
        }
    }

    /// Identities this detector accepts.
    #[must_use]
    pub fn identities(&self) -> &'static [&'static str] {
        self.identities
    }

    /// Whether the symbol carries a generated-code annotation.
    #[must_use]
    pub fn is_generated_symbol(&self, symbol: &Symbol) -> bool {
        self.identities.iter().any(|id| has_annotation(symbol, id))
    }

    /// Whether the declaration or any enclosing declaration is generated.
    #[must_use]
    pub fn is_in_generated_code(&self, unit: &CompilationUnit, id: DeclId) -> bool {
        unit.enclosing_chain(id)
            .any(|decl| declaration_has_annotation(decl, self.identities))
    }
}
