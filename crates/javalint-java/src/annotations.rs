//! Annotation matching by logical identity.
//!
//! Identities are computed once at extraction time, so `@AutoValue` with an
//! import and `@com.google.auto.value.AutoValue` compare equal here.
//! Attribute values never take part in matching.

use crate::model::TypeDeclaration;
use crate::symbols::Symbol;

/// Returns true if `symbol` carries an annotation identified by `qualified`.
///
/// Symbols without retained annotations never match.
#[must_use]
pub fn has_annotation(symbol: &Symbol, qualified: &str) -> bool {
    symbol
        .annotations()
        .is_some_and(|names| names.iter().any(|n| n.matches(qualified)))
}

/// Returns the entries of `targets` present on `symbol`, in `targets` order.
#[must_use]
pub fn annotations_among<'t>(symbol: &Symbol, targets: &[&'t str]) -> Vec<&'t str> {
    targets
        .iter()
        .copied()
        .filter(|target| has_annotation(symbol, target))
        .collect()
}

/// Returns true if the declaration itself carries any of `targets`.
#[must_use]
pub fn declaration_has_annotation(decl: &TypeDeclaration, targets: &[&str]) -> bool {
    decl.annotations
        .iter()
        .any(|a| targets.iter().any(|t| a.identity.matches(t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeclKind;
    use crate::JavaExtractor;
    use std::path::Path;

    const AUTO_VALUE: &str = "com.google.auto.value.AutoValue";
    const AUTO_ONE_OF: &str = "com.google.auto.value.AutoOneOf";

    fn symbol_for(src: &str, name: &str) -> Symbol {
        let unit = JavaExtractor::new()
            .extract(Path::new("Test.java"), src)
            .expect("extraction failed");
        let decl = unit
            .declarations()
            .find(|d| d.name == name)
            .expect("declared");
        Symbol::from_declaration(&unit, decl)
    }

    #[test]
    fn imported_and_qualified_spellings_match_identically() {
        let imported = symbol_for(
            "import com.google.auto.value.AutoValue;\n@AutoValue abstract class A {}\n",
            "A",
        );
        let qualified = symbol_for("@com.google.auto.value.AutoValue abstract class A {}\n", "A");
        assert!(has_annotation(&imported, AUTO_VALUE));
        assert!(has_annotation(&qualified, AUTO_VALUE));
    }

    #[test]
    fn same_simple_name_from_other_package_does_not_match() {
        let other = symbol_for(
            "import org.example.AutoValue;\n@AutoValue abstract class A {}\n",
            "A",
        );
        assert!(!has_annotation(&other, AUTO_VALUE));
    }

    #[test]
    fn on_demand_import_matches() {
        let star = symbol_for(
            "import com.google.auto.value.*;\n@AutoValue abstract class A {}\n",
            "A",
        );
        assert!(has_annotation(&star, AUTO_VALUE));
    }

    #[test]
    fn attribute_values_are_ignored() {
        let symbol = symbol_for(
            "@com.google.auto.value.AutoOneOf(Kind.class) abstract class A {}\n",
            "A",
        );
        assert_eq!(annotations_among(&symbol, &[AUTO_VALUE, AUTO_ONE_OF]), vec![AUTO_ONE_OF]);
    }

    #[test]
    fn unretained_annotations_never_match() {
        let symbol = Symbol::external("lib.Opaque", Some(DeclKind::Class), None);
        assert!(!has_annotation(&symbol, AUTO_VALUE));
    }

    #[test]
    fn declaration_level_lookup() {
        let unit = JavaExtractor::new()
            .extract(
                Path::new("Test.java"),
                "@javax.annotation.Generated(\"x\") class A {}\n",
            )
            .expect("extraction failed");
        let decl = unit.declarations().next().expect("declared");
        assert!(declaration_has_annotation(decl, &["javax.annotation.Generated"]));
        assert!(!declaration_has_annotation(decl, &[AUTO_VALUE]));
    }
}
