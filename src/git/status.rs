/// Working-tree state of one repository, as observed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoState {
    pub is_clean: bool,
    pub is_clean_tracked: bool,
    pub status: String,
    pub status_tracked: String,
    pub revision: String,
    pub toplevel: String,
}

impl RepoState {
    pub fn new(status: String, status_tracked: String, revision: String, toplevel: String) -> Self {
        Self {
            is_clean: is_clean_output(&status),
            is_clean_tracked: is_clean_output(&status_tracked),
            status,
            status_tracked,
            revision,
            toplevel,
        }
    }
}

/// Short-format status text reports nothing.
pub fn is_clean_output(status: &str) -> bool {
    status.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use crate::git::status::{is_clean_output, RepoState};

    fn state(status: &str, status_tracked: &str) -> RepoState {
        RepoState::new(
            status.to_string(),
            status_tracked.to_string(),
            "0123456789abcdef0123456789abcdef01234567".to_string(),
            "/repo".to_string(),
        )
    }

    #[test]
    fn whitespace_only_output_is_clean() {
        assert!(is_clean_output(""));
        assert!(is_clean_output("\n"));
        assert!(!is_clean_output("?? spam\n"));
    }

    #[test]
    fn untracked_only_repo_is_tracked_clean() {
        let repo = state("?? spam\n", "");
        assert!(!repo.is_clean);
        assert!(repo.is_clean_tracked);
    }

    #[test]
    fn tracked_modification_is_dirty_both_ways() {
        let repo = state(" M README.md\n?? spam\n", " M README.md\n");
        assert!(!repo.is_clean);
        assert!(!repo.is_clean_tracked);
    }
}
