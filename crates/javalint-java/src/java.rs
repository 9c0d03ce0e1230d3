//! Java extractor using Tree-sitter.

use std::path::Path;

use tree_sitter::{Language, LanguageError, Node, Parser};

use crate::model::{
    AnnotationArgs, AnnotationUse, AnnotationValue, CompilationUnit, DeclId, DeclKind,
    ImportDecl, Span, TypeDeclaration, TypeRef,
};
use crate::names::TypeName;

/// Node kinds whose children stay in the lexical context of their parent.
const TYPE_BODY_KINDS: &[&str] = &[
    "program",
    "class_body",
    "interface_body",
    "enum_body",
    "enum_body_declarations",
    "annotation_type_body",
];

/// Errors raised while turning source text into a [`CompilationUnit`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The Java grammar is incompatible with the linked Tree-sitter runtime.
    #[error("failed to load Java grammar: {0}")]
    Language(#[from] LanguageError),

    /// Tree-sitter returned no tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Extracts packages, imports, and type declarations from Java source.
///
/// Syntax-error regions are counted, not fatal. Declarations outside them,
/// and well-formed declarations the parser recovered inside them, are still
/// extracted.
pub struct JavaExtractor {
    language: Language,
}

/// Traversal frame: node, nearest enclosing declaration, local context flag.
type Frame<'t> = (Node<'t>, Option<DeclId>, bool);

impl JavaExtractor {
    /// Creates a new Java extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    /// Parses one file.
    ///
    /// `path` is recorded on the unit as-is; pass it relative to the
    /// analysis root.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is
    /// produced. Syntax errors in the source are not errors.
    pub fn extract(&self, path: &Path, source: &str) -> Result<CompilationUnit, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::NoTree)?;

        let mut package: Option<String> = None;
        let mut imports = Vec::new();
        let mut declarations: Vec<TypeDeclaration> = Vec::new();
        let mut error_regions = 0usize;

        let mut stack: Vec<Frame<'_>> = vec![(tree.root_node(), None, false)];
        while let Some((node, enclosing, local)) = stack.pop() {
            // error recovery may wrap well-formed declarations; keep walking
            let in_error = node.is_error();
            let nested_error = node.parent().is_some_and(|p| p.is_error());
            if node.is_missing() || (in_error && !nested_error) {
                error_regions += 1;
            }

            let mut scope = enclosing;
            let mut child_local = if in_error || TYPE_BODY_KINDS.contains(&node.kind()) {
                local
            } else {
                true
            };

            match node.kind() {
                "package_declaration" => package = Self::extract_package(&node, src),
                "import_declaration" => {
                    if let Some(import) = Self::extract_import(&node, src) {
                        imports.push(import);
                    }
                }
                kind => {
                    if let Some(decl_kind) = DeclKind::from_node_kind(kind) {
                        let id = DeclId(declarations.len());
                        let outer = enclosing.and_then(|e| declarations.get(e.0));
                        if let Some(decl) = Self::extract_declaration(
                            &node,
                            src,
                            decl_kind,
                            id,
                            enclosing,
                            local,
                            outer.map_or(package.as_deref().unwrap_or_default(), |o| {
                                o.qualified_name.as_str()
                            }),
                        ) {
                            declarations.push(decl);
                            scope = Some(id);
                            child_local = false;
                        }
                    }
                }
            }

            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, scope, child_local)),
            );
        }

        if error_regions > 0 {
            tracing::debug!(
                "{}: recovered from {error_regions} syntax error region(s)",
                path.display()
            );
        }

        Ok(CompilationUnit::new(
            path.to_path_buf(),
            package,
            imports,
            declarations,
            error_regions,
        ))
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// Source text with all whitespace removed (`a . b` becomes `a.b`).
    fn compact_text(node: &Node<'_>, src: &[u8]) -> String {
        Self::text(node, src)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    fn is_comment(node: &Node<'_>) -> bool {
        node.kind().ends_with("comment")
    }

    fn extract_package(node: &Node<'_>, src: &[u8]) -> Option<String> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))?;
        Some(Self::compact_text(&name, src))
    }

    fn extract_import(node: &Node<'_>, src: &[u8]) -> Option<ImportDecl> {
        let mut path = None;
        let mut is_static = false;
        let mut on_demand = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "scoped_identifier" | "identifier" => {
                    path = Some(Self::compact_text(&child, src));
                }
                "static" => is_static = true,
                "asterisk" => on_demand = true,
                _ => {}
            }
        }

        Some(ImportDecl {
            path: path?,
            is_static,
            on_demand,
            line: node.start_position().row + 1,
        })
    }

    fn extract_declaration(
        node: &Node<'_>,
        src: &[u8],
        kind: DeclKind,
        id: DeclId,
        enclosing: Option<DeclId>,
        is_local: bool,
        prefix: &str,
    ) -> Option<TypeDeclaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = Self::text(&name_node, src).to_owned();
        if name.is_empty() {
            return None;
        }

        let superclass = if kind == DeclKind::Class {
            node.child_by_field_name("superclass")
                .map(|clause| Self::extract_superclass(&clause, src))
        } else {
            None
        };

        let start = node.start_position();
        Some(TypeDeclaration {
            id,
            qualified_name: javalint_core::utils::qualify(prefix, &name),
            name,
            kind,
            superclass,
            annotations: Self::extract_annotations(node, src),
            enclosing,
            is_local,
            span: Span {
                line: start.row + 1,
                column: start.column + 1,
                offset: node.start_byte(),
                length: name_node.end_byte().saturating_sub(node.start_byte()),
            },
        })
    }

    /// Reads the `extends` clause (a `superclass` node).
    fn extract_superclass(clause: &Node<'_>, src: &[u8]) -> TypeRef {
        let mut cursor = clause.walk();
        let ty = clause.named_children(&mut cursor).find(|c| !Self::is_comment(c));
        match ty {
            Some(ty) => TypeRef {
                text: Self::text(&ty, src).trim().to_owned(),
                segments: Self::type_segments(&ty, src),
            },
            None => TypeRef {
                text: String::new(),
                segments: Vec::new(),
            },
        }
    }

    /// Name segments of a type, with type arguments and type annotations
    /// removed. Returns an empty vector for anything that is not a class
    /// type.
    fn type_segments(node: &Node<'_>, src: &[u8]) -> Vec<String> {
        match node.kind() {
            "type_identifier" | "identifier" => vec![Self::text(node, src).to_owned()],
            "scoped_type_identifier" => {
                let mut segments = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    match child.kind() {
                        "type_identifier"
                        | "identifier"
                        | "scoped_type_identifier"
                        | "generic_type" => {
                            let inner = Self::type_segments(&child, src);
                            if inner.is_empty() {
                                return Vec::new();
                            }
                            segments.extend(inner);
                        }
                        _ => {}
                    }
                }
                segments
            }
            "generic_type" => {
                let mut cursor = node.walk();
                let base = node
                    .named_children(&mut cursor)
                    .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"));
                base.map_or_else(Vec::new, |b| Self::type_segments(&b, src))
            }
            "annotated_type" => {
                let mut cursor = node.walk();
                let last = node
                    .named_children(&mut cursor)
                    .filter(|c| !matches!(c.kind(), "marker_annotation" | "annotation"))
                    .last();
                last.map_or_else(Vec::new, |t| Self::type_segments(&t, src))
            }
            _ => Vec::new(),
        }
    }

    /// Annotations in the declaration's `modifiers`. Identities are
    /// provisional until [`CompilationUnit::new`] binds them.
    fn extract_annotations(node: &Node<'_>, src: &[u8]) -> Vec<AnnotationUse> {
        let mut cursor = node.walk();
        let Some(modifiers) = node
            .children(&mut cursor)
            .find(|c| c.kind() == "modifiers")
        else {
            return Vec::new();
        };

        let mut annotations = Vec::new();
        let mut mod_cursor = modifiers.walk();
        for child in modifiers.named_children(&mut mod_cursor) {
            if !matches!(child.kind(), "marker_annotation" | "annotation") {
                continue;
            }
            let Some(name) = child.child_by_field_name("name") else {
                continue;
            };
            let written = Self::compact_text(&name, src);
            let args = child
                .child_by_field_name("arguments")
                .map_or(AnnotationArgs::None, |list| Self::extract_args(&list, src));
            annotations.push(AnnotationUse {
                identity: TypeName::Qualified(written.clone()),
                written,
                args,
            });
        }
        annotations
    }

    fn extract_args(list: &Node<'_>, src: &[u8]) -> AnnotationArgs {
        if list.has_error() {
            return AnnotationArgs::Malformed;
        }

        let mut cursor = list.walk();
        let elements: Vec<Node<'_>> = list
            .named_children(&mut cursor)
            .filter(|c| !Self::is_comment(c))
            .collect();

        match elements.as_slice() {
            [] => AnnotationArgs::None,
            [single] if single.kind() != "element_value_pair" => {
                AnnotationArgs::Values(vec![("value".to_owned(), Self::extract_value(single, src))])
            }
            pairs => AnnotationArgs::Values(
                pairs
                    .iter()
                    .filter_map(|pair| {
                        let key = pair.child_by_field_name("key")?;
                        let value = pair.child_by_field_name("value")?;
                        Some((
                            Self::text(&key, src).to_owned(),
                            Self::extract_value(&value, src),
                        ))
                    })
                    .collect(),
            ),
        }
    }

    fn extract_value(node: &Node<'_>, src: &[u8]) -> AnnotationValue {
        match node.kind() {
            "string_literal" => AnnotationValue::Str(Self::unquote(Self::text(node, src))),
            "element_value_array_initializer" => {
                let mut cursor = node.walk();
                AnnotationValue::Array(
                    node.named_children(&mut cursor)
                        .filter(|c| !Self::is_comment(c))
                        .map(|c| Self::extract_value(&c, src))
                        .collect(),
                )
            }
            _ => AnnotationValue::Other(Self::text(node, src).to_owned()),
        }
    }

    fn unquote(literal: &str) -> String {
        if let Some(body) = literal
            .strip_prefix("\"\"\"")
            .and_then(|s| s.strip_suffix("\"\"\""))
        {
            return body.trim().to_owned();
        }
        literal
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(literal)
            .to_owned()
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}
