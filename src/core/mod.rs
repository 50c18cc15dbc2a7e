pub mod inspect;
pub mod policy;
pub mod record;

pub use inspect::{query_root, repo_state};
pub use policy::{check_states, DirtyPolicy, DirtyRepositories};
pub use record::{record_repositories, RepoRecord};
