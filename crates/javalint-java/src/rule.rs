//! Rule trait for declaration-level lint rules.

use javalint_core::{Severity, Violation};

use crate::context::AnalysisContext;
use crate::model::TypeDeclaration;

/// A lint rule evaluated once per type declaration.
///
/// Rules are pure: they read the context and return at most one violation
/// per declaration. They must not panic or fail on unresolved or malformed
/// input.
///
/// # Example
///
/// ```ignore
/// use javalint_java::{AnalysisContext, Rule, TypeDeclaration};
/// use javalint_core::Violation;
///
/// pub struct NoEmptyNames;
///
/// impl Rule for NoEmptyNames {
///     fn name(&self) -> &'static str { "NoEmptyNames" }
///     fn code(&self) -> &'static str { "JL900" }
///
///     fn check_declaration(
///         &self,
///         ctx: &AnalysisContext<'_>,
///         decl: &TypeDeclaration,
///     ) -> Option<Violation> {
///         None
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier, also the name accepted by suppressions
    /// (e.g., "ExtendsAutoValue").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "JL001").
    fn code(&self) -> &'static str;

    /// Additional identifiers accepted by suppressions.
    fn alt_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Every identifier that suppresses this rule: name, code, alt names.
    fn suppression_names(&self) -> Vec<&'static str> {
        let mut names = vec![self.name(), self.code()];
        names.extend_from_slice(self.alt_names());
        names
    }

    /// Checks one declaration.
    fn check_declaration(
        &self,
        ctx: &AnalysisContext<'_>,
        decl: &TypeDeclaration,
    ) -> Option<Violation>;

    /// Checks every declaration of the context's unit, in source order.
    fn check(&self, ctx: &AnalysisContext<'_>) -> Vec<Violation> {
        ctx.unit()
            .declarations()
            .filter_map(|decl| self.check_declaration(ctx, decl))
            .collect()
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
