use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::util::output;

/// Full object ids only: SHA-1 (40) or SHA-256 (64) repositories.
const REVISION_PATTERN: &str = r"^(?:[0-9a-f]{40}|[0-9a-f]{64})$";

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("git {args} failed in {} ({}): {}", dir.display(), describe_code(*code), stderr.trim_end())]
    Failed {
        args: String,
        dir: PathBuf,
        code: Option<i32>,
        stderr: String,
    },
    #[error("git {args} in {} printed output that is not valid UTF-8", dir.display())]
    NotUtf8 { args: String, dir: PathBuf },
    #[error("unexpected revision {revision:?} in {}", dir.display())]
    MalformedRevision { dir: PathBuf, revision: String },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Read-only access to the version-control tool.
///
/// `query` runs the tool with `args` from `dir` and returns its stdout.
/// Implementations must not mutate the repository.
pub trait GitQuery {
    fn query(&self, dir: &Path, args: &[&str]) -> Result<String, GitError>;
}

/// Runs the real `git` executable as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    echo: bool,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            echo: false,
        }
    }

    /// Print every invocation to stderr before running it.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitQuery for GitCli {
    fn query(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        if self.echo {
            output::git_op(&format!("{}  ({})", args.join(" "), dir.display()));
        }
        let result = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| GitError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        if result.status.success() {
            return decode_stdout(result.stdout, args, dir);
        }

        Err(GitError::Failed {
            args: args.join(" "),
            dir: dir.to_path_buf(),
            code: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).to_string(),
        })
    }
}

/// Undecodable output is an error; a lossy conversion would record a path
/// that does not exist.
fn decode_stdout(stdout: Vec<u8>, args: &[&str], dir: &Path) -> Result<String, GitError> {
    String::from_utf8(stdout).map_err(|_| GitError::NotUtf8 {
        args: args.join(" "),
        dir: dir.to_path_buf(),
    })
}

/// Short-format status including untracked files.
pub fn status_short(git: &dyn GitQuery, dir: &Path) -> Result<String, GitError> {
    git.query(dir, &["status", "--short"])
}

/// Short-format status of tracked files only.
pub fn status_short_tracked(git: &dyn GitQuery, dir: &Path) -> Result<String, GitError> {
    git.query(dir, &["status", "--short", "--untracked-files=no"])
}

pub fn head_revision(git: &dyn GitQuery, dir: &Path) -> Result<String, GitError> {
    let revision = git.query(dir, &["rev-parse", "HEAD"])?.trim().to_string();
    if !is_full_revision(&revision) {
        return Err(GitError::MalformedRevision {
            dir: dir.to_path_buf(),
            revision,
        });
    }
    Ok(revision)
}

pub fn show_toplevel(git: &dyn GitQuery, dir: &Path) -> Result<String, GitError> {
    Ok(git
        .query(dir, &["rev-parse", "--show-toplevel"])?
        .trim_end()
        .to_string())
}

pub fn is_full_revision(revision: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(REVISION_PATTERN).expect("revision pattern is valid"))
        .is_match(revision)
}
