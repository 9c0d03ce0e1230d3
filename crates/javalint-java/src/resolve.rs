//! Direct supertype resolution.

use std::sync::Arc;

use javalint_core::utils::qualify;

use crate::model::{CompilationUnit, DeclKind, TypeDeclaration};
use crate::symbols::{Symbol, SymbolIndex};

/// Outcome of resolving a declaration's direct supertype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Interface, enum, record, annotation type, or class without `extends`.
    NoSupertype,
    /// The supertype and its annotations are known.
    Resolved(Arc<Symbol>),
    /// The supertype is outside the analyzed code, or its annotations were
    /// not retained.
    Unresolved {
        /// Best-effort name of the supertype.
        name: String,
    },
}

impl Resolution {
    /// Returns the resolved symbol, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&Arc<Symbol>> {
        match self {
            Self::Resolved(symbol) => Some(symbol),
            Self::NoSupertype | Self::Unresolved { .. } => None,
        }
    }
}

/// Resolves `extends` clauses against a [`SymbolIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over a built index.
    #[must_use]
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    /// Resolves the direct superclass of `decl`.
    ///
    /// Only the immediate supertype is considered.
    #[must_use]
    pub fn resolve_supertype(&self, unit: &CompilationUnit, decl: &TypeDeclaration) -> Resolution {
        if decl.kind != DeclKind::Class {
            return Resolution::NoSupertype;
        }
        let Some(superclass) = &decl.superclass else {
            return Resolution::NoSupertype;
        };
        let Some((head, rest)) = superclass.segments.split_first() else {
            tracing::debug!(
                "{}: unreadable superclass '{}' on {}",
                unit.file_path().display(),
                superclass.text,
                decl.name
            );
            return Resolution::Unresolved {
                name: superclass.text.clone(),
            };
        };
        let rest = rest.join(".");

        let name = Self::bind_head(unit, decl, head)
            .map(|fq| qualify(&fq, &rest))
            .or_else(|| {
                unit.import_scope()
                    .implicit_candidates(head)
                    .into_iter()
                    .map(|fq| qualify(&fq, &rest))
                    .find(|full| self.index.contains(full))
            })
            .unwrap_or_else(|| superclass.segments.join("."));

        match self.index.lookup(&name) {
            Some(symbol) if symbol.annotations_retained() => Resolution::Resolved(symbol),
            Some(_) => {
                tracing::debug!("Annotations of {name} were not retained");
                Resolution::Unresolved { name }
            }
            None => {
                tracing::debug!(
                    "{}: supertype {name} of {} is not indexed",
                    unit.file_path().display(),
                    decl.name
                );
                Resolution::Unresolved { name }
            }
        }
    }

    /// Binds the first segment of a type name through lexical scopes, the
    /// unit's own types, and single-type imports.
    fn bind_head(unit: &CompilationUnit, decl: &TypeDeclaration, head: &str) -> Option<String> {
        if let Some(member) = unit.member_in_scope(decl.enclosing, head) {
            return Some(member.qualified_name.clone());
        }

        let scope = unit.import_scope();
        scope
            .unit_type(head)
            .or_else(|| scope.single_import(head))
            .map(str::to_string)
    }
}
