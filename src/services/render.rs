use crate::models::change::{ChangeSummary, FileListing};
use crate::models::event::{CommitRecord, Release};
use crate::models::github::{FileDiffEntry, FileStatus};
use crate::models::payload::{Embed, EmbedAuthor, EmbedField, EmbedFooter};
use crate::utils::text::{clamp, excerpt, fit_lines};
use chrono::{DateTime, Utc};

pub const COMMITS_SHOWN: usize = 10;
pub const MAX_DETAILED_FILES: usize = 150;
pub const RELEASE_BODY_CHARS: usize = 500;
pub const RELEASE_COLOR: u32 = 0x8e44ad;

// Discord embed limits.
const MAX_TITLE: usize = 256;
const MAX_DESCRIPTION: usize = 4096;
const MAX_FIELD_VALUE: usize = 1024;
const MAX_FOOTER: usize = 2048;

/// Repository identity shared by both embed kinds.
#[derive(Debug, Clone)]
pub struct RepoContext {
    pub full_name: String,
    pub web_url: String,
    pub server_url: String,
}

impl RepoContext {
    pub fn new(full_name: &str, server_url: &str) -> Self {
        let server_url = server_url.trim_end_matches('/');
        Self {
            full_name: full_name.to_string(),
            web_url: format!("{}/{}", server_url, full_name),
            server_url: server_url.to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        self.full_name.split('/').next().unwrap_or_default()
    }

    fn author(&self) -> EmbedAuthor {
        EmbedAuthor {
            name: self.full_name.clone(),
            url: self.web_url.clone(),
            icon_url: format!("{}/{}.png", self.server_url, self.owner()),
        }
    }
}

/// Push-specific inputs to [`push_embed`].
pub struct PushDetails<'a> {
    pub branch: &'a str,
    pub pusher: &'a str,
    pub commits: &'a [CommitRecord],
    pub summary: &'a ChangeSummary,
    pub files: &'a FileListing,
    pub compare_url: Option<&'a str>,
    pub color: u32,
}

pub fn commit_line(commit: &CommitRecord, repo: &RepoContext) -> String {
    let message = commit.headline();
    let short = commit.short_id();
    let author = commit.author_name();

    match commit.full_id() {
        Some(id) => format!("• [{}]({}/commit/{}) ({}) — {}", message, repo.web_url, id, short, author),
        None => format!("• {} ({}) — {}", message, short, author),
    }
}

/// Renders the first `limit` commits, one per line.
pub fn commit_lines(commits: &[CommitRecord], repo: &RepoContext, limit: usize) -> Vec<String> {
    commits.iter().take(limit).map(|c| commit_line(c, repo)).collect()
}

/// Per-file listing from compare data, or `None` when there is nothing to list.
pub fn detailed_file_listing(files: &[FileDiffEntry]) -> Option<FileListing> {
    if files.is_empty() {
        return None;
    }

    let lines: Vec<String> = files
        .iter()
        .take(MAX_DETAILED_FILES)
        .map(|f| match f.status {
            FileStatus::Added => format!("{} — added", f.filename),
            FileStatus::Removed => format!("{} — removed", f.filename),
            FileStatus::Modified | FileStatus::Other => {
                format!("{} — +{} / -{}", f.filename, f.additions, f.deletions)
            }
        })
        .collect();

    let more = files.len().saturating_sub(MAX_DETAILED_FILES);
    Some(FileListing::new(lines, more))
}

fn code_block(files: &FileListing) -> String {
    // Fences take 8 characters of the field budget.
    let text = files.fit(MAX_FIELD_VALUE - 8);
    if text.is_empty() {
        return "—".to_string();
    }
    format!("```\n{}\n```", text)
}

fn commit_field(commits: &[CommitRecord], repo: &RepoContext) -> String {
    let lines = commit_lines(commits, repo, COMMITS_SHOWN);
    if lines.is_empty() {
        return "No commits".to_string();
    }

    let hidden = commits.len() - lines.len();
    fit_lines(&lines, hidden, MAX_FIELD_VALUE, |n| format!("…and {} more commit(s)", n))
}

pub fn push_embed(repo: &RepoContext, push: &PushDetails<'_>, timestamp: DateTime<Utc>) -> Embed {
    let description = format!(
        "**Repository:** [{}]({}) | **Branch:** {} | **Pushed by:** {}\n{}",
        repo.full_name,
        repo.web_url,
        push.branch,
        push.pusher,
        push.summary.summary_line()
    );

    let mut fields = vec![
        EmbedField::new("What changed? ✅", commit_field(push.commits, repo)),
        EmbedField::new("Files (brief)", code_block(push.files)),
        EmbedField::new(
            "Commits",
            format!("[View commits]({}/commits/{})", repo.web_url, push.branch),
        ),
    ];
    if let Some(compare) = push.compare_url {
        fields.push(EmbedField::new("Compare", clamp(compare, MAX_FIELD_VALUE)));
    }

    Embed {
        title: "What's Changed".to_string(),
        description: clamp(&description, MAX_DESCRIPTION),
        color: push.color,
        author: repo.author(),
        fields,
        footer: EmbedFooter {
            text: clamp(
                &format!("{} commit(s) — pushed by {}", push.commits.len(), push.pusher),
                MAX_FOOTER,
            ),
        },
        timestamp,
    }
}

pub fn release_embed(repo: &RepoContext, release: &Release, timestamp: DateTime<Utc>) -> Embed {
    let tag = release.tag();

    let mut description = format!(
        "**Repository:** [{}]({})\n**Tag:** {}\n**Author:** {}",
        repo.full_name,
        repo.web_url,
        tag,
        release.author_login()
    );
    if let Some(body) = release.body() {
        description.push_str("\n\n");
        description.push_str(&excerpt(body, RELEASE_BODY_CHARS));
    }

    Embed {
        title: clamp(&format!("Release published: {}", release.display_name()), MAX_TITLE),
        description: clamp(&description, MAX_DESCRIPTION),
        color: RELEASE_COLOR,
        author: repo.author(),
        fields: vec![EmbedField::new("Release", release.link().unwrap_or("—"))],
        footer: EmbedFooter {
            text: clamp(&format!("Release published — {}", tag), MAX_FOOTER),
        },
        timestamp,
    }
}
