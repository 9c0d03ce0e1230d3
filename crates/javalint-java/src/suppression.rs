//! Rule suppression through annotations and comment directives.

use std::collections::HashSet;

use javalint_core::utils::directives_near;
use javalint_core::SuppressionConfig;

use crate::model::{CompilationUnit, DeclId};

/// Rule identifiers suppressed for one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionSet(HashSet<String>);

impl SuppressionSet {
    /// Whether `name` is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<String> for SuppressionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which conventions suppress a rule.
#[derive(Debug, Clone)]
pub struct SuppressionPolicy {
    annotations: Vec<String>,
    wildcards: Vec<String>,
    comment_directives: bool,
}

impl Default for SuppressionPolicy {
    fn default() -> Self {
        Self::from(&SuppressionConfig::default())
    }
}

impl From<&SuppressionConfig> for SuppressionPolicy {
    fn from(config: &SuppressionConfig) -> Self {
        Self {
            annotations: config.annotations.clone(),
            wildcards: config.wildcards.clone(),
            comment_directives: config.comment_directives,
        }
    }
}

impl SuppressionPolicy {
    /// Adds an identifier that suppresses every rule.
    #[must_use]
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcards.push(wildcard.into());
        self
    }

    /// Adds a recognised suppression annotation.
    #[must_use]
    pub fn with_annotation(mut self, qualified: impl Into<String>) -> Self {
        self.annotations.push(qualified.into());
        self
    }

    /// Enables or disables comment directives.
    #[must_use]
    pub fn comment_directives(mut self, enabled: bool) -> Self {
        self.comment_directives = enabled;
        self
    }

    /// Collects suppressed identifiers from the declaration and every
    /// enclosing declaration up to the unit root.
    #[must_use]
    pub fn suppression_set(
        &self,
        unit: &CompilationUnit,
        id: DeclId,
        source: &str,
    ) -> SuppressionSet {
        let mut names = HashSet::new();
        for decl in unit.enclosing_chain(id) {
            for annotation in &decl.annotations {
                if !self.annotations.iter().any(|a| annotation.identity.matches(a)) {
                    continue;
                }
                if let Some(value) = annotation.args.get("value") {
                    names.extend(value.strings().into_iter().map(str::to_string));
                }
            }
            if self.comment_directives {
                for directive in directives_near(source, decl.span.line) {
                    names.extend(directive.rules);
                }
            }
        }
        SuppressionSet(names)
    }

    /// Whether any of `rule_names` or a wildcard is suppressed for the
    /// declaration.
    #[must_use]
    pub fn is_suppressed(
        &self,
        unit: &CompilationUnit,
        id: DeclId,
        source: &str,
        rule_names: &[&str],
    ) -> bool {
        let set = self.suppression_set(unit, id, source);
        if set.is_empty() {
            return false;
        }
        rule_names.iter().any(|n| set.contains(n)) || self.wildcards.iter().any(|w| set.contains(w))
    }
}
