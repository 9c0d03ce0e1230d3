//! Project-wide index of type symbols.
//!
//! The index is built once before any rule runs and is read-only afterwards,
//! so it can be shared across evaluation threads.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use javalint_core::ExternalTypeConfig;

use crate::model::{CompilationUnit, DeclId, DeclKind, TypeDeclaration};
use crate::names::TypeName;

/// Where a symbol was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolOrigin {
    /// Declared in an analyzed source file.
    Source {
        /// File containing the declaration.
        file: PathBuf,
        /// Declaration within that file.
        decl: DeclId,
    },
    /// Compiled separately and described by configuration.
    External,
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Canonical name.
    pub qualified_name: Arc<str>,
    /// Declaration kind, when known.
    pub kind: Option<DeclKind>,
    /// Declaration site.
    pub origin: SymbolOrigin,
    annotations: Option<Vec<TypeName>>,
}

impl Symbol {
    /// Symbol for a declaration in an analyzed file.
    #[must_use]
    pub fn from_declaration(unit: &CompilationUnit, decl: &TypeDeclaration) -> Self {
        Self {
            qualified_name: Arc::from(decl.qualified_name.as_str()),
            kind: Some(decl.kind),
            origin: SymbolOrigin::Source {
                file: unit.file_path().to_path_buf(),
                decl: decl.id,
            },
            annotations: Some(decl.annotations.iter().map(|a| a.identity.clone()).collect()),
        }
    }

    /// Symbol for a separately compiled type.
    ///
    /// `annotations` is `None` when the type's annotations were not
    /// retained in its compiled form.
    #[must_use]
    pub fn external(
        qualified_name: &str,
        kind: Option<DeclKind>,
        annotations: Option<Vec<String>>,
    ) -> Self {
        Self {
            qualified_name: Arc::from(qualified_name),
            kind,
            origin: SymbolOrigin::External,
            annotations: annotations
                .map(|names| names.into_iter().map(TypeName::Qualified).collect()),
        }
    }

    /// Narrows candidate annotation names to the first one that `exists`.
    #[must_use]
    pub fn narrowed(mut self, exists: impl Fn(&str) -> bool) -> Self {
        if let Some(annotations) = &mut self.annotations {
            for name in annotations.iter_mut() {
                *name = name.narrow(&exists);
            }
        }
        self
    }

    /// Annotation identities, or `None` if they were not retained.
    #[must_use]
    pub fn annotations(&self) -> Option<&[TypeName]> {
        self.annotations.as_deref()
    }

    /// Whether annotation information is available for this symbol.
    #[must_use]
    pub fn annotations_retained(&self) -> bool {
        self.annotations.is_some()
    }
}

impl From<&ExternalTypeConfig> for Symbol {
    fn from(config: &ExternalTypeConfig) -> Self {
        let kind = config.kind.as_deref().and_then(|k| {
            let parsed = DeclKind::parse(k);
            if parsed.is_none() {
                tracing::warn!("Unknown kind '{k}' for external type {}", config.name);
            }
            parsed
        });
        Self::external(&config.name, kind, config.annotations.clone())
    }
}

/// Qualified name to symbol lookup.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    symbols: HashMap<Arc<str>, Arc<Symbol>>,
}

impl SymbolIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every declaration in `units`, then the external types.
    ///
    /// On a name collision the first symbol wins and a warning is logged,
    /// so source declarations shadow external descriptions. Annotation names
    /// reachable only through the package or on-demand imports are narrowed
    /// to the first candidate that is a known type.
    #[must_use]
    pub fn build<'a>(
        units: impl IntoIterator<Item = &'a CompilationUnit>,
        externals: &[ExternalTypeConfig],
    ) -> Self {
        let units: Vec<&CompilationUnit> = units.into_iter().collect();
        let known: HashSet<&str> = units
            .iter()
            .flat_map(|unit| unit.declarations().map(|d| d.qualified_name.as_str()))
            .chain(externals.iter().map(|e| e.name.as_str()))
            .collect();

        let mut index = Self::new();
        for unit in units.iter().copied() {
            for decl in unit.declarations() {
                let symbol = Symbol::from_declaration(unit, decl);
                index.insert(symbol.narrowed(|fq| known.contains(fq)));
            }
        }
        for external in externals {
            index.insert(Symbol::from(external));
        }
        tracing::debug!("Indexed {} type symbol(s)", index.len());
        index
    }

    /// Adds a symbol. Returns false if the name was already taken.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        if let Some(existing) = self.symbols.get(&symbol.qualified_name) {
            tracing::warn!(
                "Duplicate type {}: keeping {:?}, ignoring {:?}",
                symbol.qualified_name,
                existing.origin,
                symbol.origin
            );
            return false;
        }
        self.symbols
            .insert(Arc::clone(&symbol.qualified_name), Arc::new(symbol));
        true
    }

    /// Looks up a symbol by canonical name.
    #[must_use]
    pub fn lookup(&self, qualified_name: &str) -> Option<Arc<Symbol>> {
        self.symbols.get(qualified_name).cloned()
    }

    /// Whether a symbol with this name exists.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.symbols.contains_key(qualified_name)
    }

    /// Number of indexed symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JavaExtractor;
    use std::path::Path;

    fn unit(path: &str, src: &str) -> CompilationUnit {
        JavaExtractor::new()
            .extract(Path::new(path), src)
            .expect("extraction failed")
    }

    #[test]
    fn indexes_nested_declarations() {
        let u = unit(
            "p/Outer.java",
            "package p;\nclass Outer { @Deprecated static class Inner {} }\n",
        );
        let index = SymbolIndex::build([&u], &[]);
        assert_eq!(index.len(), 2);
        let inner = index.lookup("p.Outer.Inner").expect("indexed");
        assert_eq!(inner.kind, Some(DeclKind::Class));
        assert!(inner.annotations_retained());
        assert!(inner.annotations().is_some_and(|a| a[0].matches("java.lang.Deprecated")));
    }

    #[test]
    fn first_declaration_wins_on_collision() {
        let a = unit("a/A.java", "package p;\nclass A {}\n");
        let b = unit("b/A.java", "package p;\n@Deprecated class A {}\n");
        let index = SymbolIndex::build([&a, &b], &[]);
        let symbol = index.lookup("p.A").expect("indexed");
        assert_eq!(
            symbol.origin,
            SymbolOrigin::Source {
                file: PathBuf::from("a/A.java"),
                decl: DeclId(0)
            }
        );
    }

    #[test]
    fn external_types_respect_retention() {
        let externals = vec![
            ExternalTypeConfig {
                name: "lib.Money".into(),
                kind: Some("class".into()),
                annotations: Some(vec!["com.google.auto.value.AutoValue".into()]),
            },
            ExternalTypeConfig {
                name: "lib.Opaque".into(),
                kind: None,
                annotations: None,
            },
        ];
        let index = SymbolIndex::build(std::iter::empty(), &externals);
        let money = index.lookup("lib.Money").expect("indexed");
        assert_eq!(money.origin, SymbolOrigin::External);
        assert_eq!(money.kind, Some(DeclKind::Class));
        assert!(money.annotations_retained());
        assert!(!index.lookup("lib.Opaque").expect("indexed").annotations_retained());
    }

    #[test]
    fn source_shadows_external() {
        let u = unit("lib/Money.java", "package lib;\nclass Money {}\n");
        let externals = vec![ExternalTypeConfig {
            name: "lib.Money".into(),
            kind: None,
            annotations: None,
        }];
        let index = SymbolIndex::build([&u], &externals);
        assert!(index
            .lookup("lib.Money")
            .is_some_and(|s| matches!(s.origin, SymbolOrigin::Source { .. })));
    }

    #[test]
    fn same_package_annotation_beats_on_demand_import() {
        let marker = unit("p/AutoValue.java", "package p;\npublic @interface AutoValue {}\n");
        let user = unit(
            "p/A.java",
            "package p;\nimport com.google.auto.value.*;\n@AutoValue abstract class A {}\n",
        );
        let index = SymbolIndex::build([&marker, &user], &[]);
        let a = index.lookup("p.A").expect("indexed");
        let annotations = a.annotations().expect("retained");
        assert_eq!(annotations[0], TypeName::Qualified("p.AutoValue".into()));

        // without a local declaration every candidate stays possible
        let index = SymbolIndex::build([&user], &[]);
        let a = index.lookup("p.A").expect("indexed");
        assert!(a.annotations().is_some_and(|names| names[0]
            .matches("com.google.auto.value.AutoValue")));
    }

    #[test]
    fn missing_symbol() {
        let index = SymbolIndex::new();
        assert!(index.is_empty());
        assert!(index.lookup("x.Y").is_none());
        assert!(!index.contains("x.Y"));
    }
}
