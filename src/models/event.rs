use crate::error::{NotifierError, Result};
use crate::utils::text::{first_line, short_sha};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Webhook event document as written to `GITHUB_EVENT_PATH`.
///
/// Push and release payloads share this shape; every field may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
pub struct EventDocument {
    pub repository: Option<RepositoryRef>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub pusher: Option<Pusher>,
    commits: Option<Vec<CommitRecord>>,
    pub compare: Option<String>,
    pub release: Option<Release>,
    pub action: Option<String>,
}

impl EventDocument {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NotifierError::EventNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| NotifierError::EventRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    pub fn commits(&self) -> &[CommitRecord] {
        self.commits.as_deref().unwrap_or_default()
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository.as_ref().and_then(|r| non_empty(&r.full_name))
    }

    pub fn pusher_name(&self) -> Option<&str> {
        self.pusher.as_ref().and_then(|p| non_empty(&p.name))
    }

    pub fn git_ref(&self) -> Option<&str> {
        non_empty(&self.git_ref)
    }

    pub fn compare_url(&self) -> Option<&str> {
        non_empty(&self.compare)
    }

    pub fn action(&self) -> Option<&str> {
        non_empty(&self.action)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RepositoryRef {
    pub full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pusher {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitRecord {
    pub id: Option<String>,
    pub message: Option<String>,
    pub author: Option<CommitAuthor>,
    added: Option<Vec<String>>,
    modified: Option<Vec<String>>,
    removed: Option<Vec<String>>,
}

impl CommitRecord {
    pub fn full_id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub fn short_id(&self) -> &str {
        self.full_id().map(short_sha).unwrap_or("")
    }

    pub fn headline(&self) -> &str {
        self.message.as_deref().map(first_line).unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| non_empty(&a.name).or_else(|| non_empty(&a.username)))
            .unwrap_or("")
    }

    pub fn added(&self) -> &[String] {
        self.added.as_deref().unwrap_or_default()
    }

    pub fn modified(&self) -> &[String] {
        self.modified.as_deref().unwrap_or_default()
    }

    pub fn removed(&self) -> &[String] {
        self.removed.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Release {
    pub name: Option<String>,
    pub tag_name: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<String>,
    pub author: Option<ReleaseAuthor>,
}

impl Release {
    pub fn tag(&self) -> &str {
        non_empty(&self.tag_name).unwrap_or("")
    }

    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or_else(|| self.tag())
    }

    pub fn author_login(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| non_empty(&a.login).or_else(|| non_empty(&a.name)))
            .unwrap_or("unknown")
    }

    pub fn link(&self) -> Option<&str> {
        non_empty(&self.html_url).or_else(|| non_empty(&self.url))
    }

    pub fn body(&self) -> Option<&str> {
        non_empty(&self.body)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReleaseAuthor {
    pub login: Option<String>,
    pub name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
