use std::path::PathBuf;

use serde::Serialize;

use crate::core::inspect::repo_state;
use crate::core::policy::{check_states, DirtyPolicy};
use crate::error::Result;
use crate::git::ops::GitQuery;
use crate::git::status::RepoState;

/// Persisted form of a [`RepoState`]. Fields are declared in key order so the
/// serialized objects come out sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRecord {
    pub is_clean: bool,
    pub is_clean_tracked: bool,
    pub revision: String,
    pub toplevel: String,
}

impl From<RepoState> for RepoRecord {
    fn from(state: RepoState) -> Self {
        Self {
            is_clean: state.is_clean,
            is_clean_tracked: state.is_clean_tracked,
            revision: state.revision,
            toplevel: state.toplevel,
        }
    }
}

/// Inspect every pointer in order, then apply `policy` to the whole batch.
///
/// Any query failure aborts before the policy runs; a rejected batch yields
/// [`crate::error::RecrepoError::Dirty`].
pub fn record_repositories(
    git: &dyn GitQuery,
    pointers: &[PathBuf],
    policy: DirtyPolicy,
) -> Result<Vec<RepoRecord>> {
    let states = pointers
        .iter()
        .map(|pointer| repo_state(git, pointer))
        .collect::<Result<Vec<_>>>()?;
    let states = check_states(policy, states)?;
    Ok(states.into_iter().map(RepoRecord::from).collect())
}
