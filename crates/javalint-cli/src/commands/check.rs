//! Check command implementation.

use anyhow::{Context, Result};
use javalint_java::{Analyzer, RuleBox};
use javalint_rules::{all_rules, rule_by_name};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options of `javalint check`.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes; all rules when absent.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Java feature release override.
    pub release: Option<u32>,
}

/// Runs the check command. Returns `false` if error-level violations were
/// found.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = source.load()?;

    let mut builder = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(options.exclude.iter().cloned());

    if let Some(release) = options.release {
        builder = builder.release(release);
    }

    let rules_to_add = match &options.rules {
        Some(filter) => filter_rules(filter),
        None => all_rules(),
    };
    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules (Java {})",
        path,
        analyzer.rule_count(),
        analyzer.platform()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    Ok(!result.has_errors())
}

fn filter_rules(filter: &str) -> Vec<RuleBox> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = rule_by_name(name);
            if rule.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}
