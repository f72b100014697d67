use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};

/// A GitHub repository reference, parsed from an 'owner/repo' path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse an 'owner/repo' path, as found in `GITHUB_REPOSITORY`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(|| {
            DeployError::Config(format!("Invalid repository '{raw}', expected owner/repo"))
        })?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(DeployError::Config(format!(
                "Invalid repository '{raw}', expected owner/repo"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Request body for issue creation.
#[derive(Debug, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

/// A created tracking issue.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub html_url: String,
}

/// A created or updated issue comment.
#[derive(Debug, Deserialize)]
pub struct Comment {
    pub id: u64,
}

/// Request body shared by comment creation and comment update.
#[derive(Debug, Serialize)]
pub(super) struct CommentBody<'a> {
    pub body: &'a str,
}
