//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# javalint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src/main/java"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/target/**",
]

# Respect .gitignore files
respect_gitignore = true

# Worker threads (default: one per CPU)
# parallelism = 4

# Java feature release of the analyzed code.
# Detected from $JAVA_HOME/release when unset, otherwise 17.
# release = 17

[suppression]
# Annotations whose `value` names suppressed rules
annotations = ["java.lang.SuppressWarnings"]

# Identifiers that suppress every rule, e.g. ["all"]
wildcards = []

# Honor `// javalint: allow(RuleName)` comments
comment_directives = true

# Types compiled outside this tree. Omit `annotations` when they were not
# retained; classes extending such types are never reported.
# [[external_types]]
# name = "com.example.lib.Money"
# kind = "class"
# annotations = ["com.google.auto.value.AutoValue"]

[rules.ExtendsAutoValue]
enabled = true
# severity = "warning"  # Override default severity
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("javalint.toml"), force)?;

    println!("Created javalint.toml");
    println!("\nNext steps:");
    println!("  1. Edit javalint.toml to configure rules");
    println!("  2. Run: javalint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalint_core::Config;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("ExtendsAutoValue"));
        assert!(config.suppression.wildcards.is_empty());
        assert!(config.suppression.comment_directives);
        assert!(config.external_types.is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("javalint.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
