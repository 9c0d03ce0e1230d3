//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // javalint: allow(ExtendsAutoValue) reason="generated by hand-rolled processor"
//! ```
//!
//! A directive applies to the declaration that starts on the same line, or
//! on the line directly below a comment-only line holding it.

use std::collections::HashSet;

/// Parsed allowance directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Rule identifiers that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

/// Collects the allow directives that apply to a given line.
///
/// Checks the line itself, and the line before when that line holds
/// nothing but a comment. A trailing comment on the previous line belongs
/// to the code on that line.
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
#[must_use]
pub fn directives_near(content: &str, line: usize) -> Vec<AllowDirective> {
    let lines: Vec<&str> = content.lines().collect();
    let mut found = Vec::new();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }
        let text = lines[check_line - 1];
        if check_line != line && !is_comment_only(text) {
            continue;
        }
        if let Some(directive) = parse_allow_directive(text) {
            found.push(directive);
        }
    }

    found
}

fn is_comment_only(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Parses an allowance directive from a comment line.
///
/// Accepts both `//` line comments and single-line `/* ... */` block
/// comments. Code before the comment on the same line is ignored.
#[must_use]
pub fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment_content = if let Some(idx) = line.find("//") {
        line[idx + 2..].trim()
    } else if let Some(idx) = line.find("/*") {
        let rest = &line[idx + 2..];
        rest.split("*/").next().unwrap_or(rest).trim()
    } else {
        return None;
    };

    let directive = comment_content.strip_prefix("javalint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}
