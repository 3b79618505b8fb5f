//! Repository layer: one zero-sized struct per table with async query methods.

mod task_repo;
mod user_repo;

pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
pub(crate) use user_repo::UQ_USERNAME;
