//! Analyzer orchestrating discovery, extraction, indexing, and rule runs.

use std::path::{Path, PathBuf};

use javalint_core::{Config, LintResult, Violation};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::context::AnalysisContext;
use crate::java::{ExtractError, JavaExtractor};
use crate::model::CompilationUnit;
use crate::platform::PlatformVersion;
use crate::rule::{Rule, RuleBox};
use crate::suppression::SuppressionPolicy;
use crate::symbols::SymbolIndex;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// A file could not be turned into a compilation unit.
    #[error("Failed to extract {path}: {source}")]
    Extract {
        /// Path to the file that failed.
        path: PathBuf,
        /// Underlying extraction error.
        source: ExtractError,
    },

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
    release: Option<u32>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on extraction errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Overrides the host Java feature release.
    #[must_use]
    pub fn release(mut self, release: u32) -> Self {
        self.release = Some(release);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or an
    /// exclude pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(String::as_str)
            .map(glob::Pattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        let platform = PlatformVersion::resolve(self.release.or(config.analyzer.release));
        debug!(
            "Using Java platform release {platform} (native @Generated: {})",
            platform.native_generated_annotation()
        );

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            excludes,
            suppression: SuppressionPolicy::from(&config.suppression),
            platform,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
            extractor: JavaExtractor::new(),
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    excludes: Vec<glob::Pattern>,
    suppression: SuppressionPolicy,
    platform: PlatformVersion,
    config: Config,
    fail_on_parse_error: bool,
    extractor: JavaExtractor,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the host platform version in effect.
    #[must_use]
    pub fn platform(&self) -> PlatformVersion {
        self.platform
    }

    /// Analyzes all `.java` files under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if
    /// extraction fails and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let sources = files
            .into_iter()
            .map(|path| {
                let content = std::fs::read_to_string(&path)?;
                let relative = path
                    .strip_prefix(&self.root)
                    .map_or_else(|_| path.clone(), Path::to_path_buf);
                Ok((relative, content))
            })
            .collect::<Result<Vec<_>, std::io::Error>>()?;

        self.analyze_sources(&sources)
    }

    /// Analyzes in-memory sources given as `(relative path, content)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created, or if
    /// extraction fails and `fail_on_parse_error` is set.
    pub fn analyze_sources(
        &self,
        sources: &[(PathBuf, String)],
    ) -> Result<LintResult, AnalyzerError> {
        match self.config.analyzer.parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(|| self.run(sources))
            }
            None => self.run(sources),
        }
    }

    fn run(&self, sources: &[(PathBuf, String)]) -> Result<LintResult, AnalyzerError> {
        let mut result = LintResult::new();

        let extracted: Vec<_> = sources
            .par_iter()
            .map(|(path, content)| {
                debug!("Extracting: {}", path.display());
                (path, content, self.extractor.extract(path, content))
            })
            .collect();

        let mut units: Vec<(CompilationUnit, &str)> = Vec::with_capacity(extracted.len());
        for (path, content, unit) in extracted {
            match unit {
                Ok(unit) => units.push((unit, content.as_str())),
                Err(source) => {
                    warn!("Failed to extract {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Extract {
                            path: path.clone(),
                            source,
                        });
                    }
                    result.files_skipped += 1;
                }
            }
        }

        let index = SymbolIndex::build(
            units.iter().map(|(unit, _)| unit),
            &self.config.external_types,
        );

        let rules: Vec<&dyn Rule> = self
            .rules
            .iter()
            .map(AsRef::as_ref)
            .filter(|rule| {
                let enabled = self.config.is_rule_enabled(rule.name())
                    && self.config.is_rule_enabled(rule.code());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let violations: Vec<Violation> = units
            .par_iter()
            .flat_map_iter(|(unit, content)| {
                let ctx =
                    AnalysisContext::new(unit, content, &index, self.platform, &self.suppression);
                rules
                    .iter()
                    .flat_map(|rule| self.apply_severity_override(*rule, rule.check(&ctx)))
                    .collect::<Vec<_>>()
            })
            .collect();

        result.violations = violations;
        result.files_checked = units.len();
        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Applies severity overrides from configuration, by name then code.
    fn apply_severity_override(
        &self,
        rule: &dyn Rule,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        let severity = self
            .config
            .rule_severity(rule.name())
            .or_else(|| self.config.rule_severity(rule.code()));
        if let Some(severity) = severity {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all Java source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("java") {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let rel_str = format!("/{}", relative.to_string_lossy());

        if self
            .excludes
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
        {
            return true;
        }

        // "**/build/**" also excludes a top-level build/ directory
        self.exclude_patterns.iter().any(|pattern| {
            let normalized = pattern.replace("**", "");
            !normalized.is_empty() && normalized != "/" && rel_str.contains(&normalized)
        })
    }
}
