//! Registry of built-in rules.

use crate::ExtendsAutoValue;
use javalint_java::RuleBox;

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ExtendsAutoValue::new())]
}

/// Looks up a rule by name or code.
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name() == name || rule.code() == name)
}
