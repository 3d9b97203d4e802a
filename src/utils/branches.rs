const BRANCH_REF_PREFIX: &str = "refs/heads/";
const WILDCARD: &str = "*";

/// Allow-list of branch names parsed from `NOTIFY_BRANCHES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFilter {
    branches: Vec<String>,
}

impl BranchFilter {
    pub fn parse(list: &str) -> Self {
        let branches = list
            .split(',')
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(|b| b.to_string())
            .collect();

        Self { branches }
    }

    pub fn allows(&self, branch: &str) -> bool {
        self.branches.iter().any(|b| b == WILDCARD || b == branch)
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }
}

impl Default for BranchFilter {
    fn default() -> Self {
        Self::parse("main")
    }
}

pub fn branch_from_ref(git_ref: &str) -> String {
    let branch = git_ref.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(git_ref);
    if branch.is_empty() {
        "(unknown)".to_string()
    } else {
        branch.to_string()
    }
}
