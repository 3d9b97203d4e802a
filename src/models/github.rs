use serde::Deserialize;

/// Body of `GET /repos/{owner}/{repo}/compare/{basehead}`; only the file list is used.
#[derive(Debug, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub files: Option<Vec<FileDiffEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDiffEntry {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    // renamed, copied, changed, unchanged
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_files() {
        let response: CompareResponse = serde_json::from_str(
            r#"{
                "status": "ahead",
                "files": [
                    {"filename": "a.rs", "status": "added", "additions": 10, "deletions": 0},
                    {"filename": "b.rs", "status": "renamed", "additions": 1, "deletions": 1},
                    {"filename": "c.rs", "status": "modified"}
                ]
            }"#,
        )
        .unwrap();

        let files = response.files.unwrap();
        assert_eq!(files[0].status, FileStatus::Added);
        assert_eq!(files[1].status, FileStatus::Other);
        assert_eq!(files[2].additions, 0);
    }

    #[test]
    fn missing_files_is_none() {
        let response: CompareResponse = serde_json::from_str(r#"{"message": "Not Found"}"#).unwrap();
        assert!(response.files.is_none());
    }
}
