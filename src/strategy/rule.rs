use std::fmt;

use regex::Regex;

use crate::error::{NextverError, Result};
use crate::strategy::Template;

/// Default pattern matching release branches
pub const DEFAULT_RELEASE_BRANCHES_PATTERN: &str = "^(main|master|release/.*)$";

/// Default build metadata template applied to non-release branches
pub const DEFAULT_BUILD_METADATA_TEMPLATE: &str = "{{count}}.{{firstCommit.hash.short}}";

/// The bump strategy of a rule, either a fixed number or automatic
/// detection from the commit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Major,
    Minor,
    Patch,
    #[default]
    Auto,
}

impl Strategy {
    /// Parse a strategy name case-insensitively; anything unknown falls
    /// back to [`Strategy::Auto`].
    pub fn parse(value: &str) -> Strategy {
        match value.to_lowercase().as_str() {
            "major" => Strategy::Major,
            "minor" => Strategy::Minor,
            "patch" => Strategy::Patch,
            _ => Strategy::Auto,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Major => "MAJOR",
            Strategy::Minor => "MINOR",
            Strategy::Patch => "PATCH",
            Strategy::Auto => "AUTO",
        };
        write!(f, "{}", name)
    }
}

/// A bump rule applied to the branches matching its pattern.
///
/// Rules are evaluated in configuration order and the first match wins.
/// The two templates are mutually exclusive decorations: build metadata
/// takes precedence over pre-release when both are set.
#[derive(Debug, Clone)]
pub struct BranchRule {
    /// Pattern matched against the current branch name
    pub branches_pattern: Regex,
    /// How to bump the version numbers
    pub strategy: Strategy,
    /// When set, the next version is a pre-release with these identifiers
    pub pre_release_template: Option<Template>,
    /// When true, pre-release identifiers are used verbatim instead of
    /// getting an incremented numeric suffix
    pub pre_release_overwrite: bool,
    /// When set, the next version keeps its numbers and only carries this
    /// build metadata
    pub build_metadata_template: Option<Template>,
}

impl BranchRule {
    /// Create a rule from raw configuration values. Empty template strings
    /// mean no decoration.
    pub fn new(
        strategy: Strategy,
        branches_pattern: &str,
        pre_release_template: &str,
        pre_release_overwrite: bool,
        build_metadata_template: &str,
    ) -> Result<BranchRule> {
        let pattern = Regex::new(branches_pattern).map_err(|e| {
            NextverError::config(format!(
                "invalid branches pattern '{}': {}",
                branches_pattern, e
            ))
        })?;
        Ok(BranchRule {
            branches_pattern: pattern,
            strategy,
            pre_release_template: parse_template(pre_release_template)?,
            pre_release_overwrite,
            build_metadata_template: parse_template(build_metadata_template)?,
        })
    }

    /// Create a plain rule without decoration, typically for release branches
    pub fn release(branches_pattern: &str) -> Result<BranchRule> {
        BranchRule::new(Strategy::Auto, branches_pattern, "", false, "")
    }

    /// Create a rule producing pre-release versions
    pub fn pre_release(
        branches_pattern: &str,
        template: &str,
        overwrite: bool,
    ) -> Result<BranchRule> {
        BranchRule::new(Strategy::Auto, branches_pattern, template, overwrite, "")
    }

    /// Create a rule producing build metadata pseudo versions
    pub fn build(branches_pattern: &str, template: &str) -> Result<BranchRule> {
        BranchRule::new(Strategy::Auto, branches_pattern, "", false, template)
    }

    /// Whether this rule applies to the given branch
    pub fn matches(&self, branch: &str) -> bool {
        self.branches_pattern.is_match(branch)
    }
}

/// Default rule set: a clean automatic bump on release branches and a
/// build metadata pseudo version everywhere else.
pub fn default_rules() -> Vec<BranchRule> {
    vec![
        BranchRule::release(DEFAULT_RELEASE_BRANCHES_PATTERN)
            .expect("hard-coded release rule is valid"),
        BranchRule::build(".*", DEFAULT_BUILD_METADATA_TEMPLATE)
            .expect("hard-coded catch-all rule is valid"),
    ]
}

fn parse_template(text: &str) -> Result<Option<Template>> {
    if text.is_empty() {
        return Ok(None);
    }
    Template::parse(text).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        let cases = vec![
            ("major", Strategy::Major),
            ("MAJOR", Strategy::Major),
            ("Minor", Strategy::Minor),
            ("patch", Strategy::Patch),
            ("auto", Strategy::Auto),
            ("", Strategy::Auto),
            ("anything-else", Strategy::Auto),
        ];
        for (input, expected) in cases {
            assert_eq!(Strategy::parse(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Major.to_string(), "MAJOR");
        assert_eq!(Strategy::Minor.to_string(), "MINOR");
        assert_eq!(Strategy::Patch.to_string(), "PATCH");
        assert_eq!(Strategy::Auto.to_string(), "AUTO");
    }

    #[test]
    fn test_release_rule_matches_release_branches() {
        let rule = BranchRule::release(DEFAULT_RELEASE_BRANCHES_PATTERN).unwrap();
        assert!(rule.matches("main"));
        assert!(rule.matches("master"));
        assert!(rule.matches("release/1.x"));
        assert!(!rule.matches("feature/test"));
        assert!(!rule.matches("my-master"));
        assert_eq!(rule.strategy, Strategy::Auto);
        assert!(rule.pre_release_template.is_none());
        assert!(rule.build_metadata_template.is_none());
    }

    #[test]
    fn test_pre_release_rule() {
        let rule = BranchRule::pre_release("^milestone-1.1$", "alpha", false).unwrap();
        assert!(rule.matches("milestone-1.1"));
        assert_eq!(
            rule.pre_release_template.as_ref().map(Template::as_str),
            Some("alpha")
        );
        assert!(!rule.pre_release_overwrite);
        assert!(rule.build_metadata_template.is_none());
    }

    #[test]
    fn test_build_rule() {
        let rule = BranchRule::build(".*", DEFAULT_BUILD_METADATA_TEMPLATE).unwrap();
        assert!(rule.matches("anything"));
        assert_eq!(
            rule.build_metadata_template.as_ref().map(Template::as_str),
            Some(DEFAULT_BUILD_METADATA_TEMPLATE)
        );
    }

    #[test]
    fn test_empty_templates_mean_no_decoration() {
        let rule = BranchRule::new(Strategy::Minor, ".*", "", false, "").unwrap();
        assert!(rule.pre_release_template.is_none());
        assert!(rule.build_metadata_template.is_none());
        assert_eq!(rule.strategy, Strategy::Minor);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = BranchRule::release("(unclosed").unwrap_err();
        assert!(err.to_string().contains("invalid branches pattern"));
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let result = BranchRule::pre_release(".*", "{{bogus}}", false);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_rules_order() {
        let rules = default_rules();
        assert_eq!(rules.len(), 2);
        assert!(rules[0].matches("master"));
        assert!(!rules[0].matches("feature/test"));
        assert!(rules[1].matches("feature/test"));
    }
}
