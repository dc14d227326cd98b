use std::fmt;

use crate::error::{NextverError, Result};
use crate::strategy::Context;

/// The placeholder paths a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Branch,
    Count,
    FirstCommitHash,
    FirstCommitHashShort,
    FirstCommitMessage,
    FirstCommitAuthorName,
    FirstCommitAuthorEmail,
    FirstCommitCommitterName,
    FirstCommitCommitterEmail,
    LastVersion,
    LastTag,
}

impl Field {
    fn parse(path: &str) -> Option<Field> {
        match path {
            "branch" => Some(Field::Branch),
            "count" => Some(Field::Count),
            "firstCommit.hash" => Some(Field::FirstCommitHash),
            "firstCommit.hash.short" => Some(Field::FirstCommitHashShort),
            "firstCommit.message" => Some(Field::FirstCommitMessage),
            "firstCommit.author.name" => Some(Field::FirstCommitAuthorName),
            "firstCommit.author.email" => Some(Field::FirstCommitAuthorEmail),
            "firstCommit.committer.name" => Some(Field::FirstCommitCommitterName),
            "firstCommit.committer.email" => Some(Field::FirstCommitCommitterEmail),
            "lastVersion" => Some(Field::LastVersion),
            "lastTag" => Some(Field::LastTag),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Field::Branch => "branch",
            Field::Count => "count",
            Field::FirstCommitHash => "firstCommit.hash",
            Field::FirstCommitHashShort => "firstCommit.hash.short",
            Field::FirstCommitMessage => "firstCommit.message",
            Field::FirstCommitAuthorName => "firstCommit.author.name",
            Field::FirstCommitAuthorEmail => "firstCommit.author.email",
            Field::FirstCommitCommitterName => "firstCommit.committer.name",
            Field::FirstCommitCommitterEmail => "firstCommit.committer.email",
            Field::LastVersion => "lastVersion",
            Field::LastTag => "lastTag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field),
}

/// A version decoration template such as `{{count}}.{{firstCommit.hash.short}}`.
///
/// Placeholders use a fixed vocabulary resolved against [`Context`]:
/// `branch`, `count`, `firstCommit.hash`, `firstCommit.hash.short`,
/// `firstCommit.message`, `firstCommit.author.name`,
/// `firstCommit.author.email`, `firstCommit.committer.name`,
/// `firstCommit.committer.email`, `lastVersion` and `lastTag`.
/// Everything outside `{{..}}` is copied verbatim.
///
/// Syntax and vocabulary are checked by [`Template::parse`], so a bad
/// template fails at configuration time. Evaluation can still fail when a
/// `firstCommit` placeholder is resolved against an empty commit range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template, validating placeholder syntax and vocabulary
    pub fn parse(text: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                NextverError::config(format!("unterminated placeholder in template '{}'", text))
            })?;
            let path = after[..end].trim();
            let field = Field::parse(path).ok_or_else(|| {
                NextverError::config(format!(
                    "unknown template field '{}' in template '{}'",
                    path, text
                ))
            })?;
            segments.push(Segment::Placeholder(field));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Template {
            text: text.to_string(),
            segments,
        })
    }

    /// Evaluate the template against a context
    pub fn eval(&self, context: &Context) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Placeholder(field) => out.push_str(&resolve(*field, context)?),
            }
        }
        Ok(out)
    }

    /// The raw template text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn resolve(field: Field, context: &Context) -> Result<String> {
    match field {
        Field::Branch => Ok(context.branch.to_string()),
        Field::Count => Ok(context.commits.len().to_string()),
        Field::LastVersion => Ok(context.last_version.to_string()),
        Field::LastTag => Ok(context.last_tag.name.clone()),
        _ => {
            let commit = context.commits.first().ok_or_else(|| {
                NextverError::template(format!(
                    "cannot resolve '{}' on an empty commit range",
                    field.as_str()
                ))
            })?;
            Ok(match field {
                Field::FirstCommitHash => commit.hash.to_string(),
                Field::FirstCommitHashShort => commit.hash.short().to_string(),
                Field::FirstCommitMessage => commit.message.clone(),
                Field::FirstCommitAuthorName => commit.author.name.clone(),
                Field::FirstCommitAuthorEmail => commit.author.email.clone(),
                Field::FirstCommitCommitterName => commit.committer.name.clone(),
                Field::FirstCommitCommitterEmail => commit.committer.email.clone(),
                _ => unreachable!("context fields are handled above"),
            })
        }
    }
}
