use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{RecrepoError, Result};
use crate::git::ops::{head_revision, show_toplevel, status_short, status_short_tracked, GitQuery};
use crate::git::status::RepoState;

/// Absolute directory to run queries from: the pointer itself, or the
/// directory containing it when it names a file.
///
/// The pointer need not exist; only its containing directory must.
pub fn query_root(pointer: &Path) -> Result<PathBuf> {
    let pointer_error = |source| RecrepoError::Pointer {
        path: pointer.to_path_buf(),
        source,
    };
    let path = match fs::canonicalize(pointer) {
        Ok(path) => path,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let absolute = env::current_dir()?.join(pointer);
            return match absolute.parent() {
                Some(parent) => fs::canonicalize(parent).map_err(pointer_error),
                None => Err(pointer_error(err)),
            };
        }
        Err(err) => return Err(pointer_error(err)),
    };
    if path.is_dir() {
        return Ok(path);
    }
    match path.parent() {
        Some(parent) => Ok(parent.to_path_buf()),
        None => Ok(path),
    }
}

pub fn repo_state(git: &dyn GitQuery, pointer: &Path) -> Result<RepoState> {
    let root = query_root(pointer)?;
    let status = status_short(git, &root)?;
    let status_tracked = status_short_tracked(git, &root)?;
    let revision = head_revision(git, &root)?;
    let toplevel = show_toplevel(git, &root)?;
    Ok(RepoState::new(status, status_tracked, revision, toplevel))
}
