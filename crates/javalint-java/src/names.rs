//! Name resolution against a compilation unit's package and imports.

use std::collections::HashMap;
use std::fmt;

use javalint_core::utils::{qualify, simple_name};

use crate::model::ImportDecl;

/// `java.lang` annotation types that are always in scope.
const JAVA_LANG_ANNOTATIONS: &[&str] = &[
    "Override",
    "Deprecated",
    "SuppressWarnings",
    "FunctionalInterface",
    "SafeVarargs",
];

/// Logical identity of an annotation or type, independent of how it was
/// written at the use site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// A single fully-qualified name.
    Qualified(String),
    /// A simple name that could denote any of several qualified names
    /// (same-package type, on-demand imports, `java.lang`).
    Candidates {
        /// Name as written.
        simple: String,
        /// Possible qualified names in lookup order.
        candidates: Vec<String>,
    },
}

impl TypeName {
    /// Returns true if this name may denote `qualified`.
    #[must_use]
    pub fn matches(&self, qualified: &str) -> bool {
        match self {
            Self::Qualified(name) => name == qualified,
            Self::Candidates { candidates, .. } => candidates.iter().any(|c| c == qualified),
        }
    }

    /// Commits to the first candidate for which `exists` holds. Qualified
    /// names, and candidate lists with no existing entry, are returned
    /// unchanged.
    #[must_use]
    pub fn narrow(&self, exists: impl Fn(&str) -> bool) -> Self {
        match self {
            Self::Candidates { candidates, .. } => candidates
                .iter()
                .find(|c| exists(c))
                .map_or_else(|| self.clone(), |c| Self::Qualified(c.clone())),
            Self::Qualified(_) => self.clone(),
        }
    }

    /// Simple name of the type.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Qualified(name) => simple_name(name),
            Self::Candidates { simple, .. } => simple,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qualified(name) => write!(f, "{name}"),
            Self::Candidates { simple, .. } => write!(f, "{simple}"),
        }
    }
}

/// Names visible in a compilation unit without qualification.
#[derive(Debug, Clone, Default)]
pub struct ImportScope {
    package: Option<String>,
    single: HashMap<String, String>,
    on_demand: Vec<String>,
    unit_types: HashMap<String, String>,
}

impl ImportScope {
    /// Builds the scope for a unit from its package, imports and top-level
    /// type names.
    pub fn new<'a>(
        package: Option<&str>,
        imports: &[ImportDecl],
        top_level: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let package_prefix = package.unwrap_or_default();
        let mut single = HashMap::new();
        let mut on_demand = Vec::new();

        for import in imports {
            if import.on_demand {
                on_demand.push(import.path.clone());
            } else {
                // first import of a simple name wins; javac rejects duplicates anyway
                single
                    .entry(simple_name(&import.path).to_string())
                    .or_insert_with(|| import.path.clone());
            }
        }

        let unit_types = top_level
            .into_iter()
            .map(|name| (name.to_string(), qualify(package_prefix, name)))
            .collect();

        Self {
            package: package.map(str::to_string),
            single,
            on_demand,
            unit_types,
        }
    }

    /// Declared package.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Qualified name bound by a single-type import of `simple`.
    #[must_use]
    pub fn single_import(&self, simple: &str) -> Option<&str> {
        self.single.get(simple).map(String::as_str)
    }

    /// Qualified name of a top-level type declared in this unit.
    #[must_use]
    pub fn unit_type(&self, simple: &str) -> Option<&str> {
        self.unit_types.get(simple).map(String::as_str)
    }

    /// Prefixes imported on demand, in source order.
    #[must_use]
    pub fn on_demand(&self) -> &[String] {
        &self.on_demand
    }

    /// Qualified names a simple type name could denote through the package,
    /// on-demand imports, and `java.lang`, in lookup order.
    #[must_use]
    pub fn implicit_candidates(&self, simple: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.on_demand.len() + 2);
        candidates.push(qualify(self.package.as_deref().unwrap_or_default(), simple));
        candidates.extend(self.on_demand.iter().map(|prefix| qualify(prefix, simple)));
        let java_lang = qualify("java.lang", simple);
        if !candidates.contains(&java_lang) {
            candidates.push(java_lang);
        }
        candidates
    }

    /// Resolves an annotation name as written at a use site.
    #[must_use]
    pub fn resolve_annotation(&self, written: &str) -> TypeName {
        if let Some((head, rest)) = written.split_once('.') {
            let bound = self
                .single_import(head)
                .or_else(|| self.unit_type(head))
                .map_or_else(|| written.to_string(), |fq| qualify(fq, rest));
            return TypeName::Qualified(bound);
        }

        if let Some(fq) = self
            .single_import(written)
            .or_else(|| self.unit_type(written))
        {
            return TypeName::Qualified(fq.to_string());
        }

        if JAVA_LANG_ANNOTATIONS.contains(&written) {
            return TypeName::Qualified(qualify("java.lang", written));
        }

        TypeName::Candidates {
            simple: written.to_string(),
            candidates: self.implicit_candidates(written),
        }
    }
}
