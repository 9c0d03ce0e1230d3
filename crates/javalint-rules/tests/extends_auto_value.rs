//! End-to-end runs of ExtendsAutoValue through the analyzer.

use std::fs;
use std::path::Path;

use javalint_core::{Config, Severity};
use javalint_java::Analyzer;
use javalint_rules::{all_rules, ExtendsAutoValue};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "src/main/java/com/example/model/Money.java",
        "package com.example.model;\n\
         \n\
         import com.google.auto.value.AutoValue;\n\
         \n\
         @AutoValue\n\
         public abstract class Money {\n\
           public abstract long cents();\n\
         }\n",
    );
    write(
        root,
        "src/main/java/com/example/app/Cash.java",
        "package com.example.app;\n\
         \n\
         import com.example.model.Money;\n\
         \n\
         public class Cash extends Money {\n\
           @Override public long cents() { return 0; }\n\
         }\n",
    );
    write(
        root,
        "src/main/java/com/example/app/Legacy.java",
        "package com.example.app;\n\
         \n\
         @SuppressWarnings(\"ExtendsAutoValue\")\n\
         public class Legacy extends com.example.model.Money {\n\
           @Override public long cents() { return 1; }\n\
         }\n",
    );
    write(
        root,
        "build/generated/AutoValue_Money.java",
        "package com.example.model;\n\
         final class AutoValue_Money extends Money {}\n",
    );
    dir
}

#[test]
fn reports_subclass_in_other_package() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(ExtendsAutoValue::new())
        .build()
        .unwrap();
    let result = analyzer.analyze().unwrap();

    assert_eq!(result.files_checked, 3);
    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(
        v.location.file,
        Path::new("src/main/java/com/example/app/Cash.java")
    );
    assert_eq!(v.location.line, 5);
    assert!(result.has_errors());
}

#[test]
fn config_can_disable_or_downgrade() {
    let dir = project();

    let disabled = Config::parse("[rules.ExtendsAutoValue]\nenabled = false\n").unwrap();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .config(disabled)
        .rule(ExtendsAutoValue::new())
        .build()
        .unwrap();
    assert!(analyzer.analyze().unwrap().violations.is_empty());

    let downgraded = Config::parse("[rules.JL001]\nseverity = \"warning\"\n").unwrap();
    let mut builder = Analyzer::builder().root(dir.path()).config(downgraded);
    for rule in all_rules() {
        builder = builder.rule_box(rule);
    }
    let result = builder.build().unwrap().analyze().unwrap();
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Warning);
    assert!(!result.has_errors());
}

#[test]
fn generated_subclass_is_accepted_when_not_excluded() {
    let dir = project();
    write(
        dir.path(),
        "gen/AutoValue_Other.java",
        "package com.example.model;\n\
         @javax.annotation.processing.Generated(\"com.google.auto.value.processor.AutoValueProcessor\")\n\
         final class AutoValue_Other extends Money {}\n",
    );
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .release(17)
        .rule(ExtendsAutoValue::new())
        .build()
        .unwrap();
    let result = analyzer.analyze().unwrap();
    assert_eq!(result.files_checked, 4);
    assert_eq!(result.violations.len(), 1);
}
