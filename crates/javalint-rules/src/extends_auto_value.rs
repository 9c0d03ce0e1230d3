//! Rule to forbid extending `@AutoValue` types.
//!
//! # Rationale
//!
//! AutoValue generates `equals`, `hashCode`, `toString`, and builders that
//! assume the annotated class has exactly the generated subclass. Any other
//! subclass silently breaks those contracts.
//!
//! Only the direct superclass is inspected. `@AutoOneOf` comes from the same
//! generator and is treated the same way.
//!
//! # Exclusions
//!
//! - The class, or a class enclosing it, is annotated `@Generated`
//!   (`javax.annotation.processing.Generated` on Java 9+,
//!   `javax.annotation.Generated` on every release)
//! - The superclass itself is generated
//!
//! # Suppression
//!
//! - `@SuppressWarnings("ExtendsAutoValue")` on the class or an enclosing class
//! - `// javalint: allow(ExtendsAutoValue)` comment

use javalint_core::utils::simple_name;
use javalint_core::{Suggestion, Violation};
use javalint_java::annotations::annotations_among;
use javalint_java::{AnalysisContext, Resolution, Rule, TypeDeclaration};

/// Rule code for ExtendsAutoValue.
pub const CODE: &str = "JL001";

/// Rule name for ExtendsAutoValue.
pub const NAME: &str = "ExtendsAutoValue";

/// `com.google.auto.value.AutoValue`
pub const AUTO_VALUE: &str = "com.google.auto.value.AutoValue";

/// `com.google.auto.value.AutoOneOf`
pub const AUTO_ONE_OF: &str = "com.google.auto.value.AutoOneOf";

const TARGETS: &[&str] = &[AUTO_VALUE, AUTO_ONE_OF];

/// Decision reached for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a class, or no `extends` clause.
    NoSupertype,
    /// The superclass or its annotations are unknown.
    Unresolved,
    /// The superclass carries no target annotation.
    NotAnnotated,
    /// The class or its superclass is generated code.
    Generated,
    /// The rule is suppressed for the class.
    Suppressed,
    /// The class extends an AutoValue type.
    Finding(Violation),
}

impl Outcome {
    /// Returns the violation, if one was produced.
    #[must_use]
    pub fn into_violation(self) -> Option<Violation> {
        match self {
            Self::Finding(v) => Some(v),
            _ => None,
        }
    }
}

/// Forbids classes whose direct superclass is annotated `@AutoValue`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendsAutoValue;

impl ExtendsAutoValue {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs every check in order and reports where the declaration stopped.
    #[must_use]
    pub fn evaluate(&self, ctx: &AnalysisContext<'_>, decl: &TypeDeclaration) -> Outcome {
        let symbol = match ctx.resolve_supertype(decl) {
            Resolution::NoSupertype => return Outcome::NoSupertype,
            Resolution::Unresolved { .. } => return Outcome::Unresolved,
            Resolution::Resolved(symbol) => symbol,
        };

        let Some(&matched) = annotations_among(&symbol, TARGETS).first() else {
            return Outcome::NotAnnotated;
        };

        let generated = ctx.generated_code();
        if generated.is_in_generated_code(ctx.unit(), decl.id)
            || generated.is_generated_symbol(&symbol)
        {
            return Outcome::Generated;
        }

        if ctx.is_suppressed(decl, &self.suppression_names()) {
            return Outcome::Suppressed;
        }

        let annotation = simple_name(matched);
        Outcome::Finding(
            Violation::new(
                CODE,
                NAME,
                self.default_severity(),
                ctx.location(decl),
                format!("Class should not extend a type annotated with @{annotation}"),
            )
            .with_suggestion(Suggestion::new(format!(
                "{} is generated by @{annotation}; hold an instance of it instead of extending it",
                symbol.qualified_name
            ))),
        )
    }
}

impl Rule for ExtendsAutoValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids extending classes annotated with @AutoValue or @AutoOneOf"
    }

    fn check_declaration(
        &self,
        ctx: &AnalysisContext<'_>,
        decl: &TypeDeclaration,
    ) -> Option<Violation> {
        let outcome = self.evaluate(ctx, decl);
        if !matches!(outcome, Outcome::Finding(_) | Outcome::NoSupertype) {
            tracing::debug!("{}: {} -> {:?}", NAME, decl.qualified_name, outcome);
        }
        outcome.into_violation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalint_core::{ExternalTypeConfig, Severity};
    use javalint_java::{
        CompilationUnit, JavaExtractor, PlatformVersion, SuppressionPolicy, SymbolIndex,
    };
    use std::path::Path;

    struct Fixture {
        units: Vec<(CompilationUnit, String)>,
        index: SymbolIndex,
        policy: SuppressionPolicy,
        platform: PlatformVersion,
    }

    impl Fixture {
        fn new(files: &[(&str, &str)]) -> Self {
            Self::with_externals(files, &[])
        }

        fn with_externals(files: &[(&str, &str)], externals: &[ExternalTypeConfig]) -> Self {
            let extractor = JavaExtractor::new();
            let units: Vec<(CompilationUnit, String)> = files
                .iter()
                .map(|(path, src)| {
                    let unit = extractor
                        .extract(Path::new(path), src)
                        .expect("extraction failed");
                    (unit, (*src).to_string())
                })
                .collect();
            let index = SymbolIndex::build(units.iter().map(|(u, _)| u), externals);
            Self {
                units,
                index,
                policy: SuppressionPolicy::default(),
                platform: PlatformVersion::DEFAULT,
            }
        }

        fn platform(mut self, release: u32) -> Self {
            self.platform = PlatformVersion::new(release);
            self
        }

        fn policy(mut self, policy: SuppressionPolicy) -> Self {
            self.policy = policy;
            self
        }

        fn outcome(&self, name: &str) -> Outcome {
            for (unit, src) in &self.units {
                if let Some(decl) = unit.declarations().find(|d| d.name == name) {
                    let ctx =
                        AnalysisContext::new(unit, src, &self.index, self.platform, &self.policy);
                    return ExtendsAutoValue.evaluate(&ctx, decl);
                }
            }
            panic!("no declaration named {name}");
        }

        fn violations(&self) -> Vec<Violation> {
            self.units
                .iter()
                .flat_map(|(unit, src)| {
                    let ctx =
                        AnalysisContext::new(unit, src, &self.index, self.platform, &self.policy);
                    ExtendsAutoValue.check(&ctx)
                })
                .collect()
        }
    }

    fn one(src: &str) -> Fixture {
        Fixture::new(&[("TestClass.java", src)])
    }

    fn flagged(fixture: &Fixture) -> Vec<String> {
        fixture
            .violations()
            .into_iter()
            .map(|v| format!("{}:{}", v.location.file.display(), v.location.line))
            .collect()
    }

    #[test]
    fn test_no_superclass() {
        let f = one("public class TestClass {}\n");
        assert_eq!(f.outcome("TestClass"), Outcome::NoSupertype);
        assert!(f.violations().is_empty());
    }

    #[test]
    fn test_plain_superclass() {
        let f = one("class SuperClass {}\npublic class TestClass extends SuperClass {}\n");
        assert_eq!(f.outcome("TestClass"), Outcome::NotAnnotated);
        assert!(f.violations().is_empty());
    }

    #[test]
    fn test_auto_value_class_may_extend_plain_class() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             public class TestClass {}\n\
             @AutoValue class AutoClass extends TestClass {}\n",
        );
        assert!(f.violations().is_empty());
    }

    #[test]
    fn test_extends_imported_auto_value() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             public class TestClass extends AutoClass {}\n",
        );
        let violations = f.violations();
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.code, CODE);
        assert_eq!(v.rule, NAME);
        assert_eq!(v.severity, Severity::Error);
        assert_eq!(v.location.line, 3);
        assert_eq!(
            v.message,
            "Class should not extend a type annotated with @AutoValue"
        );
        assert!(v.suggestion.is_some());
    }

    #[test]
    fn test_extends_qualified_auto_value() {
        let f = one(
            "@com.google.auto.value.AutoValue class AutoClass {}\n\
             public class TestClass extends AutoClass {}\n",
        );
        assert_eq!(flagged(&f), vec!["TestClass.java:2"]);
    }

    #[test]
    fn test_inner_class_extends_sibling() {
        let f = Fixture::new(&[(
            "OuterClass.java",
            "import com.google.auto.value.AutoValue;\n\
             public class OuterClass {\n\
               @AutoValue class AutoClass {}\n\
               class TestClass extends AutoClass {}\n\
             }\n",
        )]);
        assert_eq!(flagged(&f), vec!["OuterClass.java:4"]);
    }

    #[test]
    fn test_extends_static_nested_by_qualified_name() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             class OuterClass {\n\
               @AutoValue static class AutoClass {}\n\
             }\n\
             public class TestClass extends OuterClass.AutoClass {}\n",
        );
        assert_eq!(flagged(&f), vec!["TestClass.java:5"]);
    }

    #[test]
    fn test_suppressed() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             @SuppressWarnings(\"ExtendsAutoValue\")\n\
             public class TestClass extends AutoClass {}\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::Suppressed);
        assert!(f.violations().is_empty());
    }

    #[test]
    fn test_suppressed_by_enclosing_class_and_code() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             @SuppressWarnings({\"unchecked\", \"JL001\"})\n\
             class Outer {\n\
               class TestClass extends AutoClass {}\n\
             }\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::Suppressed);
    }

    #[test]
    fn test_suppressed_by_comment_directive() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             // javalint: allow(ExtendsAutoValue) reason=\"legacy\"\n\
             public class TestClass extends AutoClass {}\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::Suppressed);
    }

    #[test]
    fn test_trailing_directive_on_previous_declaration_does_not_leak() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {} // javalint: allow(ExtendsAutoValue)\n\
             class TestClass extends AutoClass {}\n",
        );
        assert!(matches!(f.outcome("TestClass"), Outcome::Finding(_)));
    }

    #[test]
    fn test_wildcard_only_when_configured() {
        let src = "import com.google.auto.value.AutoValue;\n\
                   @AutoValue class AutoClass {}\n\
                   @SuppressWarnings(\"all\")\n\
                   public class TestClass extends AutoClass {}\n";
        assert!(matches!(one(src).outcome("TestClass"), Outcome::Finding(_)));
        let f = one(src).policy(SuppressionPolicy::default().with_wildcard("all"));
        assert_eq!(f.outcome("TestClass"), Outcome::Suppressed);
    }

    #[test]
    fn test_generated_subclass_on_modern_platform() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             import javax.annotation.processing.Generated;\n\
             @AutoValue class AutoClass {}\n\
             @Generated(value=\"hi\") public class TestClass extends AutoClass {}\n",
        )
        .platform(11);
        assert_eq!(f.outcome("TestClass"), Outcome::Generated);
    }

    #[test]
    fn test_generated_subclass_on_java_8() {
        let src = "import com.google.auto.value.AutoValue;\n\
                   import javax.annotation.Generated;\n\
                   @AutoValue class AutoClass {}\n\
                   @Generated(value=\"hi\") public class TestClass extends AutoClass {}\n";
        assert_eq!(one(src).platform(8).outcome("TestClass"), Outcome::Generated);
        // the legacy name stays recognised on newer releases
        assert_eq!(one(src).platform(17).outcome("TestClass"), Outcome::Generated);
    }

    #[test]
    fn test_processing_generated_recognised_on_java_8() {
        // a unit compiled for 9+ analyzed on an 8 host
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             import javax.annotation.processing.Generated;\n\
             @AutoValue class AutoClass {}\n\
             @Generated(\"hi\") class TestClass extends AutoClass {}\n",
        )
        .platform(8);
        assert_eq!(f.outcome("TestClass"), Outcome::Generated);
    }

    #[test]
    fn test_generated_enclosing_class() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             @javax.annotation.Generated(\"proc\")\n\
             class Wrapper { static class TestClass extends AutoClass {} }\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::Generated);
    }

    #[test]
    fn test_auto_one_of() {
        let f = one(
            "import com.google.auto.value.AutoOneOf;\n\
             @AutoOneOf(Kind.class) abstract class Either {}\n\
             class TestClass extends Either {}\n",
        );
        let violations = f.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Class should not extend a type annotated with @AutoOneOf"
        );
    }

    #[test]
    fn test_generic_superclass() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue abstract class Pair<A, B> {}\n\
             class TestClass extends Pair<String, Integer> {}\n",
        );
        assert_eq!(flagged(&f), vec!["TestClass.java:3"]);
    }

    #[test]
    fn test_interfaces_are_ignored() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue interface Shape {}\n\
             interface TestClass extends Shape {}\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::NoSupertype);
    }

    #[test]
    fn test_only_direct_supertype_is_inspected() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             @SuppressWarnings(\"ExtendsAutoValue\") class Middle extends AutoClass {}\n\
             class TestClass extends Middle {}\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::NotAnnotated);
    }

    #[test]
    fn test_same_simple_name_other_package() {
        let f = one(
            "import org.example.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             class TestClass extends AutoClass {}\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::NotAnnotated);
    }

    #[test]
    fn test_cross_file_supertype() {
        let f = Fixture::new(&[
            (
                "com/example/Money.java",
                "package com.example;\n\
                 import com.google.auto.value.AutoValue;\n\
                 @AutoValue public abstract class Money {}\n",
            ),
            (
                "com/example/app/Cash.java",
                "package com.example.app;\n\
                 import com.example.Money;\n\
                 class Cash extends Money {}\n",
            ),
        ]);
        assert_eq!(flagged(&f), vec!["com/example/app/Cash.java:3"]);
    }

    #[test]
    fn test_external_supertypes() {
        let externals = vec![
            ExternalTypeConfig {
                name: "lib.Money".into(),
                kind: Some("class".into()),
                annotations: Some(vec![AUTO_VALUE.into()]),
            },
            ExternalTypeConfig {
                name: "lib.Opaque".into(),
                kind: Some("class".into()),
                annotations: None,
            },
        ];
        let f = Fixture::with_externals(
            &[(
                "TestClass.java",
                "import lib.Money;\nimport lib.Opaque;\n\
                 class TestClass extends Money {}\n\
                 class Other extends Opaque {}\n",
            )],
            &externals,
        );
        assert!(matches!(f.outcome("TestClass"), Outcome::Finding(_)));
        assert_eq!(f.outcome("Other"), Outcome::Unresolved);
    }

    #[test]
    fn test_unknown_supertype_is_unresolved() {
        let f = one(
            "import java.util.AbstractList;\n\
             class TestClass extends AbstractList<String> {}\n",
        );
        assert_eq!(f.outcome("TestClass"), Outcome::Unresolved);
        assert!(f.violations().is_empty());
    }

    #[test]
    fn test_local_class() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             class Holder {\n\
               @AutoValue static abstract class AutoClass {}\n\
               void run() {\n\
                 class TestClass extends AutoClass {}\n\
               }\n\
             }\n",
        );
        assert_eq!(flagged(&f), vec!["TestClass.java:5"]);
    }

    #[test]
    fn test_member_annotation_type_shadows_import() {
        let f = Fixture::new(&[(
            "O.java",
            "import com.google.auto.value.AutoValue;\n\
             class Outer {\n\
               @interface AutoValue {}\n\
               @AutoValue static class A {}\n\
               static class B extends A {}\n\
             }\n",
        )]);
        assert_eq!(f.outcome("B"), Outcome::NotAnnotated);
        assert!(flagged(&f).is_empty());
    }

    #[test]
    fn test_same_package_annotation_shadows_on_demand_import() {
        let user = (
            "p/A.java",
            "package p;\n\
             import com.google.auto.value.*;\n\
             @AutoValue abstract class A {}\n\
             class B extends A {}\n",
        );
        let f = Fixture::new(&[
            ("p/AutoValue.java", "package p;\npublic @interface AutoValue {}\n"),
            user,
        ]);
        assert_eq!(f.outcome("B"), Outcome::NotAnnotated);

        // the on-demand import is the only candidate left
        let f = Fixture::new(&[user]);
        assert_eq!(flagged(&f), vec!["p/A.java:4"]);
    }

    #[test]
    fn test_malformed_annotation_arguments_still_match() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue(foo bar) abstract class AutoClass {}\n\
             class TestClass extends AutoClass {}\n",
        );
        assert!(matches!(f.outcome("TestClass"), Outcome::Finding(_)));
    }

    #[test]
    fn test_declaration_after_syntax_error_is_checked() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             }}} ((( garbage\n\
             class TestClass extends AutoClass {}\n",
        );
        assert!(matches!(f.outcome("TestClass"), Outcome::Finding(_)));
    }

    #[test]
    fn test_idempotent() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             class A extends AutoClass {}\n\
             class B extends AutoClass {}\n",
        );
        assert_eq!(f.violations(), f.violations());
        assert_eq!(f.violations().len(), 2);
    }

    #[test]
    fn test_message_snapshot() {
        let f = one(
            "import com.google.auto.value.AutoValue;\n\
             @AutoValue class AutoClass {}\n\
             public class TestClass extends AutoClass {}\n",
        );
        let v = &f.violations()[0];
        insta::assert_snapshot!(
            v.to_string(),
            @"TestClass.java:3:1: error [JL001] Class should not extend a type annotated with @AutoValue"
        );
    }
}
