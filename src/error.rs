use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::policy::DirtyRepositories;
use crate::git::ops::GitError;

#[derive(Debug, Error)]
pub enum RecrepoError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("git error: {0}")]
    Git(#[from] GitError),
    #[error("cannot resolve {}: {source}", path.display())]
    Pointer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Dirty(#[from] DirtyRepositories),
    #[error("failed to write {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RecrepoError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RecrepoError::Dirty(_) => DirtyRepositories::CODE,
            RecrepoError::Git(GitError::Failed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecrepoError>;
