use crate::models::event::CommitRecord;
use crate::utils::text::fit_lines;
use std::collections::HashSet;

pub const MAX_TOUCHED_FILES: usize = 200;

/// File statistics aggregated over every commit of a push.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
    /// Distinct paths in first-seen order, capped at [`MAX_TOUCHED_FILES`].
    pub files: Vec<String>,
}

impl ChangeSummary {
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        let mut summary = Self::default();
        let mut seen = HashSet::new();

        for commit in commits {
            summary.added += commit.added().len();
            summary.modified += commit.modified().len();
            summary.removed += commit.removed().len();

            let paths = commit.added().iter().chain(commit.modified()).chain(commit.removed());
            for path in paths {
                if summary.files.len() < MAX_TOUCHED_FILES && seen.insert(path.as_str()) {
                    summary.files.push(path.clone());
                }
            }
        }

        summary
    }

    pub fn summary_line(&self) -> String {
        format!("➕ {} · ✳️ {} · ➖ {}", self.added, self.modified, self.removed)
    }

    /// Listing used when the compare API gives nothing better.
    pub fn fallback_listing(&self) -> FileListing {
        if self.files.is_empty() {
            FileListing::new(vec!["No modified files listed.".to_string()], 0)
        } else {
            FileListing::new(self.files.clone(), 0)
        }
    }
}

/// One line per file, plus how many files were left out of `lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListing {
    pub lines: Vec<String>,
    pub more: usize,
}

impl FileListing {
    pub fn new(lines: Vec<String>, more: usize) -> Self {
        Self { lines, more }
    }

    pub fn trailer(count: usize) -> String {
        format!("...and {} more files", count)
    }

    /// Renders whole lines within `max` characters, the trailer counting every file left out.
    pub fn fit(&self, max: usize) -> String {
        fit_lines(&self.lines, self.more, max, Self::trailer)
    }
}
