use std::fmt;

use crate::git::status::RepoState;

/// Which working-tree changes block a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirtyPolicy {
    /// Any tracked or untracked change fails.
    #[default]
    Strict,
    /// Only changes to tracked files fail.
    IgnoreUntracked,
    /// Nothing fails.
    IgnoreDirty,
}

impl DirtyPolicy {
    /// `ignore_dirty` takes precedence over `ignore_untracked`.
    pub fn from_flags(ignore_dirty: bool, ignore_untracked: bool) -> Self {
        if ignore_dirty {
            DirtyPolicy::IgnoreDirty
        } else if ignore_untracked {
            DirtyPolicy::IgnoreUntracked
        } else {
            DirtyPolicy::Strict
        }
    }

    pub fn rejects(&self, state: &RepoState) -> bool {
        match self {
            DirtyPolicy::Strict => !state.is_clean,
            DirtyPolicy::IgnoreUntracked => !state.is_clean_tracked,
            DirtyPolicy::IgnoreDirty => false,
        }
    }

    /// Status text shown for a rejected repository.
    pub fn status_text<'a>(&self, state: &'a RepoState) -> &'a str {
        match self {
            DirtyPolicy::IgnoreUntracked => state.status_tracked.as_str(),
            _ => state.status.as_str(),
        }
    }
}

/// Flag spelling, or `strict` for the default.
impl fmt::Display for DirtyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirtyPolicy::Strict => write!(f, "strict"),
            DirtyPolicy::IgnoreUntracked => write!(f, "--ignore-untracked"),
            DirtyPolicy::IgnoreDirty => write!(f, "--ignore-dirty"),
        }
    }
}

/// Repositories rejected by a [`DirtyPolicy`]. `Display` renders the
/// report printed before aborting.
#[derive(Debug, Clone)]
pub struct DirtyRepositories {
    policy: DirtyPolicy,
    repos: Vec<RepoState>,
}

impl DirtyRepositories {
    /// Exit status for a rejected run; 113 sits below the range the shell
    /// reserves for itself.
    pub const CODE: i32 = 113;

    pub fn new(policy: DirtyPolicy, repos: Vec<RepoState>) -> Self {
        Self { policy, repos }
    }

    pub fn repos(&self) -> &[RepoState] {
        &self.repos
    }
}

impl fmt::Display for DirtyRepositories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.repos.len() > 1 {
            "repositories"
        } else {
            "repository"
        };
        writeln!(f, "{} dirty {} found:", self.repos.len(), noun)?;
        for repo in &self.repos {
            writeln!(f)?;
            writeln!(f, "* {} @ {}", repo.toplevel, repo.revision)?;
            for line in self.policy.status_text(repo).lines() {
                writeln!(f, "|   {}", line)?;
            }
        }
        writeln!(f)?;
        write!(f, "Aborting...")
    }
}

impl std::error::Error for DirtyRepositories {}

/// Fails with every rejected repository, in input order, or hands the
/// states back untouched.
pub fn check_states(
    policy: DirtyPolicy,
    states: Vec<RepoState>,
) -> Result<Vec<RepoState>, DirtyRepositories> {
    let rejected: Vec<RepoState> = states
        .iter()
        .filter(|state| policy.rejects(state))
        .cloned()
        .collect();
    if rejected.is_empty() {
        Ok(states)
    } else {
        Err(DirtyRepositories::new(policy, rejected))
    }
}
