//! Compiled-unit model produced by the Java extractor.
//!
//! Every type is immutable once [`JavaExtractor`](crate::JavaExtractor)
//! returns a [`CompilationUnit`]. Declarations live in a flat arena indexed
//! by [`DeclId`]; lexical nesting is recorded through
//! [`TypeDeclaration::enclosing`].

use std::path::{Path, PathBuf};

use javalint_core::utils::qualify;

use crate::names::{ImportScope, TypeName};

/// Index of a declaration within its [`CompilationUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub usize);

/// Kind of type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// `class Foo`
    Class,
    /// `interface Foo`
    Interface,
    /// `enum Foo`
    Enum,
    /// `record Foo(...)`
    Record,
    /// `@interface Foo`
    Annotation,
}

impl DeclKind {
    /// Maps a Tree-sitter node kind to a declaration kind.
    #[must_use]
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(Self::Class),
            "interface_declaration" => Some(Self::Interface),
            "enum_declaration" => Some(Self::Enum),
            "record_declaration" => Some(Self::Record),
            "annotation_type_declaration" => Some(Self::Annotation),
            _ => None,
        }
    }

    /// Parses the keyword used in configuration files.
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "record" => Some(Self::Record),
            "annotation" | "@interface" => Some(Self::Annotation),
            _ => None,
        }
    }
}

/// Position of a declaration header in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset of the declaration start.
    pub offset: usize,
    /// Bytes from the declaration start to the end of its name.
    pub length: usize,
}

/// A type reference as written in an `extends` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Source text of the reference.
    pub text: String,
    /// Name segments with type arguments and type annotations removed
    /// (`Outer.Inner<T>` becomes `["Outer", "Inner"]`). Empty when the
    /// reference could not be read.
    pub segments: Vec<String>,
}

/// A literal annotation element value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// A string literal, unquoted.
    Str(String),
    /// `{a, b, ...}`
    Array(Vec<AnnotationValue>),
    /// Any other expression, kept as source text.
    Other(String),
}

impl AnnotationValue {
    /// Returns the string literals in this value, flattening one array level.
    #[must_use]
    pub fn strings(&self) -> Vec<&str> {
        match self {
            Self::Str(s) => vec![s.as_str()],
            Self::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Self::Str(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect(),
            Self::Other(_) => Vec::new(),
        }
    }
}

/// Arguments of an annotation use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationArgs {
    /// Marker annotation, or `()`.
    None,
    /// `key = value` pairs; a single unnamed element is stored as `value`.
    Values(Vec<(String, AnnotationValue)>),
    /// The argument list contained syntax errors.
    Malformed,
}

impl AnnotationArgs {
    /// Looks up an element by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        match self {
            Self::Values(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Self::None | Self::Malformed => None,
        }
    }
}

/// An annotation attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationUse {
    /// Name as written at the use site, whitespace removed.
    pub written: String,
    /// Logical identity resolved against the unit's scopes and imports.
    pub identity: TypeName,
    /// Element values.
    pub args: AnnotationArgs,
}

/// A class, interface, enum, record, or annotation type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Position in the unit's declaration arena.
    pub id: DeclId,
    /// Simple name.
    pub name: String,
    /// Canonical name: package, enclosing declarations, then `name`.
    pub qualified_name: String,
    /// Kind of declaration.
    pub kind: DeclKind,
    /// Direct superclass, for classes with an `extends` clause.
    pub superclass: Option<TypeRef>,
    /// Annotations on the declaration.
    pub annotations: Vec<AnnotationUse>,
    /// Lexically enclosing declaration.
    pub enclosing: Option<DeclId>,
    /// Declared inside a method, constructor, initializer, or expression.
    pub is_local: bool,
    /// Header position.
    pub span: Span,
}

/// A single import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without `.*`.
    pub path: String,
    /// `import static ...`
    pub is_static: bool,
    /// `import a.b.*`
    pub on_demand: bool,
    /// Line number (1-indexed).
    pub line: usize,
}

/// One parsed Java source file.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    file_path: PathBuf,
    package: Option<String>,
    imports: Vec<ImportDecl>,
    scope: ImportScope,
    declarations: Vec<TypeDeclaration>,
    error_regions: usize,
}

impl CompilationUnit {
    /// Assembles a unit. Declarations must be in source order with ids
    /// matching their positions.
    ///
    /// Annotation identities are (re)bound here from each annotation's
    /// written name: member types of enclosing declarations first, then the
    /// unit's import scope.
    #[must_use]
    pub fn new(
        file_path: PathBuf,
        package: Option<String>,
        imports: Vec<ImportDecl>,
        declarations: Vec<TypeDeclaration>,
        error_regions: usize,
    ) -> Self {
        let scope = ImportScope::new(
            package.as_deref(),
            &imports,
            declarations
                .iter()
                .filter(|d| d.enclosing.is_none())
                .map(|d| d.name.as_str()),
        );
        let mut unit = Self {
            file_path,
            package,
            imports,
            scope,
            declarations,
            error_regions,
        };
        unit.bind_annotations();
        unit
    }

    fn bind_annotations(&mut self) {
        let identities: Vec<Vec<TypeName>> = self
            .declarations
            .iter()
            .map(|decl| {
                decl.annotations
                    .iter()
                    .map(|a| self.annotation_identity(decl, &a.written))
                    .collect()
            })
            .collect();
        for (decl, bound) in self.declarations.iter_mut().zip(identities) {
            for (annotation, identity) in decl.annotations.iter_mut().zip(bound) {
                annotation.identity = identity;
            }
        }
    }

    fn annotation_identity(&self, decl: &TypeDeclaration, written: &str) -> TypeName {
        let (head, rest) = written.split_once('.').unwrap_or((written, ""));
        match self.member_in_scope(decl.enclosing, head) {
            Some(member) => TypeName::Qualified(qualify(&member.qualified_name, rest)),
            None => self.scope.resolve_annotation(written),
        }
    }

    /// Finds a member type named `simple` of `scope` or of any declaration
    /// enclosing it, innermost first. Top-level types are not considered.
    #[must_use]
    pub fn member_in_scope(
        &self,
        scope: Option<DeclId>,
        simple: &str,
    ) -> Option<&TypeDeclaration> {
        scope
            .into_iter()
            .flat_map(|outer| self.enclosing_chain(outer))
            .find_map(|outer| self.members_of(Some(outer.id)).find(|m| m.name == simple))
    }

    /// Path of the source file, relative to the analysis root.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Package name, if declared.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Import statements in source order.
    #[must_use]
    pub fn imports(&self) -> &[ImportDecl] {
        &self.imports
    }

    /// Names visible through the package and imports.
    #[must_use]
    pub fn import_scope(&self) -> &ImportScope {
        &self.scope
    }

    /// Number of syntax-error regions the parser recovered from.
    #[must_use]
    pub fn error_regions(&self) -> usize {
        self.error_regions
    }

    /// All type declarations, nested and local ones included, in source order.
    pub fn declarations(&self) -> std::slice::Iter<'_, TypeDeclaration> {
        self.declarations.iter()
    }

    /// Looks up a declaration by id.
    #[must_use]
    pub fn declaration(&self, id: DeclId) -> Option<&TypeDeclaration> {
        self.declarations.get(id.0)
    }

    /// Declarations whose lexically enclosing declaration is `scope`
    /// (`None` selects top-level declarations).
    pub fn members_of(&self, scope: Option<DeclId>) -> impl Iterator<Item = &TypeDeclaration> {
        self.declarations
            .iter()
            .filter(move |d| d.enclosing == scope)
    }

    /// The declaration itself followed by each enclosing declaration,
    /// innermost first.
    #[must_use]
    pub fn enclosing_chain(&self, id: DeclId) -> EnclosingChain<'_> {
        EnclosingChain {
            unit: self,
            next: Some(id),
        }
    }
}

/// Iterator over a declaration and its enclosing declarations.
pub struct EnclosingChain<'a> {
    unit: &'a CompilationUnit,
    next: Option<DeclId>,
}

impl<'a> Iterator for EnclosingChain<'a> {
    type Item = &'a TypeDeclaration;

    fn next(&mut self) -> Option<Self::Item> {
        let decl = self.unit.declaration(self.next?)?;
        self.next = decl.enclosing;
        Some(decl)
    }
}
