#[cfg(test)]
pub(crate) mod fake;
pub mod ops;
pub mod status;

pub use ops::{GitCli, GitError, GitQuery};
pub use status::RepoState;
