use tracing::{debug, warn};

use crate::analyzer::CommitAnalyzer;
use crate::domain::{Tag, Version, VersionBump};
use crate::error::{NextverError, Result};
use crate::git::GitRepo;
use crate::strategy::rule::default_rules;
use crate::strategy::{BranchRule, Context, Strategy};

/// The decision taken for one bump computation.
///
/// Selecting the action evaluates any rule templates, so building a
/// `BumpAction` can fail while applying one cannot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpAction {
    /// Keep the last version unchanged
    Skip,
    /// Bump a version number without decoration
    Apply(VersionBump),
    /// Produce a pre-release version, falling back to the given bump when
    /// the last version is not already a pre-release
    PreRelease {
        identifiers: String,
        overwrite: bool,
        fallback: VersionBump,
    },
    /// Keep the version numbers and attach build metadata
    Annotate { metadata: String },
}

impl BumpAction {
    /// Apply the action to the last version
    pub fn apply(&self, version: &Version) -> Version {
        match self {
            BumpAction::Skip => version.clone(),
            BumpAction::Apply(bump) => bump.apply(version),
            BumpAction::PreRelease {
                identifiers,
                overwrite,
                fallback,
            } => version.bump_pre_release(identifiers, *overwrite, *fallback),
            BumpAction::Annotate { metadata } => version.with_build_metadata(metadata.clone()),
        }
    }
}

/// Branch aware bump strategy: a commit analyzer plus an ordered rule list
#[derive(Debug)]
pub struct BumpStrategy {
    analyzer: CommitAnalyzer,
    rules: Vec<BranchRule>,
}

impl BumpStrategy {
    /// Create a strategy from an analyzer and rules
    pub fn new(analyzer: CommitAnalyzer, rules: Vec<BranchRule>) -> Self {
        BumpStrategy { analyzer, rules }
    }

    /// The conventional commits strategy: automatic bumps on release
    /// branches, build metadata pseudo versions everywhere else.
    pub fn conventional_commits() -> Self {
        BumpStrategy::new(CommitAnalyzer::default(), default_rules())
    }

    /// Select the bump action for the given context.
    ///
    /// The first rule matching the branch wins; when none matches the
    /// version is left unchanged. An AUTO rule with no commit in range also
    /// leaves the version unchanged, decorations included. Fixed strategies
    /// always bump and decorate, commits or not.
    pub fn select_action(&self, context: &Context) -> Result<BumpAction> {
        let rule = match self.rules.iter().find(|r| r.matches(context.branch)) {
            Some(rule) => rule,
            None => {
                debug!(
                    branch = context.branch,
                    "no rule matches the branch, version stays unchanged"
                );
                return Ok(BumpAction::Skip);
            }
        };

        let base = match rule.strategy {
            Strategy::Major => VersionBump::Major,
            Strategy::Minor => VersionBump::Minor,
            Strategy::Patch => VersionBump::Patch,
            Strategy::Auto => {
                if context.commits.is_empty() {
                    debug!("no commit since the last tag, version stays unchanged");
                    return Ok(BumpAction::Skip);
                }
                self.analyzer
                    .classify(context.commits, context.last_version.is_unstable())
            }
        };
        debug!(strategy = %rule.strategy, bump = %base, "selected rule");

        // build metadata and pre-release are exclusive, build metadata wins
        if let Some(template) = &rule.build_metadata_template {
            let metadata = template.eval(context)?;
            return Ok(BumpAction::Annotate { metadata });
        }
        if let Some(template) = &rule.pre_release_template {
            let identifiers = template.eval(context)?;
            return Ok(BumpAction::PreRelease {
                identifiers,
                overwrite: rule.pre_release_overwrite,
                fallback: base,
            });
        }
        Ok(BumpAction::Apply(base))
    }
}

impl Default for BumpStrategy {
    fn default() -> Self {
        BumpStrategy::conventional_commits()
    }
}

/// Computes the next version of a repository by feeding its git state
/// through a [`BumpStrategy`].
pub struct BumpEngine<R: GitRepo> {
    strategy: BumpStrategy,
    repo: R,
}

impl<R: GitRepo> BumpEngine<R> {
    /// Create an engine over a repository
    pub fn new(strategy: BumpStrategy, repo: R) -> Self {
        BumpEngine { strategy, repo }
    }

    /// Compute the next version.
    ///
    /// Runs the collaborator calls in strict sequence: fetch tags, find the
    /// last relative tag, read the current branch, list the commits since
    /// the tag, then select and apply the bump action. A missing tag is
    /// only a warning and the computation starts from the zero version; any
    /// other collaborator failure aborts with the failing stage attached.
    pub fn bump(&self) -> Result<Version> {
        self.repo
            .fetch_tags()
            .map_err(|e| NextverError::git("fetch tags", e))?;

        let last_tag = match self.repo.get_last_relative_tag("HEAD") {
            Ok(Some(tag)) => tag,
            Ok(None) => {
                warn!("no version tag found, starting from the zero version");
                Tag::default()
            }
            Err(e) => return Err(NextverError::git("get last relative tag", e)),
        };

        let last_version = Version::parse(&last_tag.name)?;

        let branch = self
            .repo
            .get_current_branch()
            .map_err(|e| NextverError::git("get current branch", e))?;

        let commits = self
            .repo
            .get_commits(&last_tag.name, "HEAD")
            .map_err(|e| NextverError::git("get commits", e))?;

        debug!(
            branch = %branch,
            last_tag = %last_tag.name,
            last_version = %last_version,
            commits = commits.len(),
            "computing next version"
        );

        let context = Context::new(&branch, &last_version, &last_tag, &commits);
        let action = self.strategy.select_action(&context)?;
        Ok(action.apply(&last_version))
    }
}
