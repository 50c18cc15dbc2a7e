use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::git::ops::{GitError, GitQuery};

#[derive(Debug, Clone, Default)]
pub struct FakeRepo {
    pub status: String,
    pub status_tracked: String,
    pub revision: String,
    pub toplevel: String,
}

impl FakeRepo {
    pub fn clean(toplevel: &str, revision: &str) -> Self {
        Self {
            revision: format!("{revision}\n"),
            toplevel: format!("{toplevel}\n"),
            ..Self::default()
        }
    }

    pub fn with_untracked(mut self, name: &str) -> Self {
        self.status.push_str(&format!("?? {name}\n"));
        self
    }

    pub fn with_modified(mut self, name: &str) -> Self {
        let line = format!(" M {name}\n");
        self.status.push_str(&line);
        self.status_tracked.push_str(&line);
        self
    }
}

/// In-memory stand-in for `git`, keyed by the directory a query runs in.
#[derive(Default)]
pub struct FakeGit {
    repos: HashMap<PathBuf, FakeRepo>,
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl FakeGit {
    pub fn with_repo(mut self, dir: &Path, repo: FakeRepo) -> Self {
        self.repos.insert(dir.to_path_buf(), repo);
        self
    }

    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.borrow().clone()
    }
}

impl GitQuery for FakeGit {
    fn query(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let joined = args.join(" ");
        self.calls
            .borrow_mut()
            .push((dir.to_path_buf(), joined.clone()));
        let not_a_repo = || GitError::Failed {
            args: joined.clone(),
            dir: dir.to_path_buf(),
            code: Some(128),
            stderr: "fatal: not a git repository (or any of the parent directories): .git\n"
                .to_string(),
        };
        let repo = self.repos.get(dir).ok_or_else(not_a_repo)?;
        match args {
            ["status", "--short"] => Ok(repo.status.clone()),
            ["status", "--short", "--untracked-files=no"] => Ok(repo.status_tracked.clone()),
            ["rev-parse", "HEAD"] => Ok(repo.revision.clone()),
            ["rev-parse", "--show-toplevel"] => Ok(repo.toplevel.clone()),
            _ => Err(not_a_repo()),
        }
    }
}
